use anyhow::{Context, Result};
use clap::Parser;
use hand_overlay::overlay::style::parse_hex_color;
use hand_overlay::{
    CaptureMode, DisplayMode, GeoHull, HandOverlay, HullComputer, JsonResultSource,
    LandmarkSource, OverlayStyle, RasterCanvas,
};
use image::{imageops, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source image the landmarks were detected on
    #[arg(short, long)]
    image: PathBuf,

    /// Detection results (JSON, one result or an array of results)
    #[arg(short, long)]
    results: PathBuf,

    /// Output PNG path
    /// With more than one result a frame suffix is added to the file name
    #[arg(short, long, default_value = "overlay.png")]
    output: PathBuf,

    /// View width (defaults to the image width)
    #[arg(long)]
    view_width: Option<u32>,

    /// View height (defaults to the image height)
    #[arg(long)]
    view_height: Option<u32>,

    /// Source of the imagery, selects the scale-factor formula
    #[arg(long, value_enum, default_value_t = CaptureMode::Image)]
    capture_mode: CaptureMode,

    /// Draw the hand skeleton or the convex hull of each hand
    #[arg(long, value_enum, default_value_t = DisplayMode::Original)]
    display_mode: DisplayMode,

    /// Landmark color (#RRGGBB)
    #[arg(long, value_parser = parse_hex_color)]
    point_color: Option<Rgba<u8>>,

    /// Skeleton and hull color (#RRGGBB)
    #[arg(long, value_parser = parse_hex_color)]
    line_color: Option<Rgba<u8>>,

    /// Stroke width for points and lines, in pixels
    #[arg(long)]
    stroke_width: Option<f32>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn style(&self) -> OverlayStyle {
        let mut style = OverlayStyle::default();
        if let Some(color) = self.point_color {
            style.point.color = color;
        }
        if let Some(color) = self.line_color {
            style.line.color = color;
        }
        if let Some(width) = self.stroke_width {
            style.point.stroke_width = width;
            style.line.stroke_width = width;
        }
        style
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("hand-overlay starting");

    let image = image::open(&args.image)
        .with_context(|| format!("Failed to open image {}", args.image.display()))?
        .into_rgba8();
    let (image_width, image_height) = image.dimensions();
    let view_width = args.view_width.unwrap_or(image_width);
    let view_height = args.view_height.unwrap_or(image_height);

    tracing::info!("Image: {}x{}", image_width, image_height);
    tracing::info!("View: {}x{}", view_width, view_height);
    tracing::info!(
        "Capture mode: {:?}, display mode: {:?}",
        args.capture_mode,
        args.display_mode
    );

    let mut source = JsonResultSource::open(&args.results)
        .context("Failed to load detection results")?;

    let mut overlay = HandOverlay::new(view_width, view_height, args.style(), GeoHull);

    run_pipeline(
        &mut source,
        &mut overlay,
        &image,
        args.capture_mode,
        args.display_mode,
        &args.output,
    )?;

    Ok(())
}

fn run_pipeline<S, H>(
    source: &mut S,
    overlay: &mut HandOverlay<H>,
    image: &RgbaImage,
    capture_mode: CaptureMode,
    display_mode: DisplayMode,
    output: &Path,
) -> Result<()>
where
    S: LandmarkSource,
    H: HullComputer,
{
    let (image_width, image_height) = image.dimensions();
    let numbered = source.remaining().map_or(true, |n| n > 1);
    let mut frame_count = 0u64;
    let mut total_compose_time = Duration::ZERO;
    let mut total_render_time = Duration::ZERO;
    let mut total_write_time = Duration::ZERO;

    while let Some(result) = source
        .next_result()
        .context("Failed to read detection result")?
    {
        tracing::debug!(
            "Frame {} at {}ms: {} hand(s)",
            frame_count,
            result.timestamp_ms,
            result.hands()
        );
        for (hand, labels) in result.handedness.iter().enumerate() {
            if let Some(best) = labels.first() {
                tracing::debug!("Hand {}: {} ({:.2})", hand, best.category_name, best.score);
            }
        }

        overlay.update(result, image_height, image_width, capture_mode, display_mode);

        // Paint the source frame the way the view shows it
        let compose_start = Instant::now();
        let background = compose_background(image, overlay.view_size(), overlay.scale_factor());
        total_compose_time += compose_start.elapsed();

        let render_start = Instant::now();
        let mut canvas = RasterCanvas::from_image(background);
        overlay.render(&mut canvas);
        total_render_time += render_start.elapsed();

        let write_start = Instant::now();
        let path = if numbered {
            frame_output_path(output, frame_count)
        } else {
            output.to_path_buf()
        };
        canvas
            .image()
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        total_write_time += write_start.elapsed();

        frame_count += 1;

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            log_stats(frame_count, total_compose_time, total_render_time, total_write_time);
        }
    }

    if frame_count == 0 {
        tracing::warn!("No detection results in input, nothing written");
        return Ok(());
    }

    log_stats(frame_count, total_compose_time, total_render_time, total_write_time);
    tracing::info!("Wrote {} frame(s)", frame_count);
    Ok(())
}

fn log_stats(frame_count: u64, compose: Duration, render: Duration, write: Duration) {
    let avg_compose_ms = compose.as_secs_f64() * 1000.0 / frame_count as f64;
    let avg_render_ms = render.as_secs_f64() * 1000.0 / frame_count as f64;
    let avg_write_ms = write.as_secs_f64() * 1000.0 / frame_count as f64;
    tracing::info!(
        "Frame {}: compose={:.1}ms, render={:.1}ms, write={:.1}ms",
        frame_count,
        avg_compose_ms,
        avg_render_ms,
        avg_write_ms
    );
}

/// Scale the source frame and anchor it at the view's top-left corner
fn compose_background(image: &RgbaImage, view: (u32, u32), scale: f32) -> RgbaImage {
    let _span = tracing::debug_span!("compose").entered();

    let (view_width, view_height) = view;
    let mut background = RgbaImage::from_pixel(view_width, view_height, Rgba([0, 0, 0, 255]));
    if !scale.is_finite() || scale <= 0.0 {
        return background;
    }

    let (width, height) = image.dimensions();
    let scaled_width = ((width as f32 * scale).round() as u32).max(1);
    let scaled_height = ((height as f32 * scale).round() as u32).max(1);
    let scaled = if (scaled_width, scaled_height) != (width, height) {
        imageops::resize(
            image,
            scaled_width,
            scaled_height,
            imageops::FilterType::Lanczos3,
        )
    } else {
        image.clone()
    };

    imageops::replace(&mut background, &scaled, 0, 0);
    background
}

/// `out.png` -> `out_00003.png`
fn frame_output_path(output: &Path, index: u64) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "overlay".to_string());
    let ext = output
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{}_{:05}.{}", stem, index, ext))
}
