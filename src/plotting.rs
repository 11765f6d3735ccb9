//! Charts for a sweep
//!
//! A [`SweepChart`] draws two stacked panels for one [`Sweep`]:
//! - the main panel, `eˣ` (solid) against `Pₙ(x)` (dashed), on a fixed y-range with values
//!   clipped to it,
//! - the error panel, `eˣ - Pₙ(x)` as a filled area, scaled to fit the data.
//!
//! The chart owns its styling ([`ChartTheme`]) and layout ([`PlotOptions`]); build it once and
//! render as many sweeps as needed. Charts are drawn as SVG with [`plotters`], and PNG output is
//! rasterized from that SVG with [`resvg`].
//!
//! The [`crate::plot!`] macro renders a sweep straight to a file named by [`crate::plot_filename!`].
//! - The assertion macros use this on failure.
use std::{ops::Range, path::Path};

use plotters::prelude::*;
use resvg::usvg;

use crate::{
    display::{self, unicode},
    sweep::Sweep,
    value::{CoordExt, Value},
};

pub use plotters;

/// Error occurring during plotting
#[derive(Debug, thiserror::Error)]
pub enum PlottingError {
    /// Error drawing the plot
    #[error("Error drawing plot: {0}")]
    Draw(#[from] DrawingAreaErrorKind<<SVGBackend<'static> as DrawingBackend>::ErrorType>),

    /// Error casting a value
    #[error("A value could not be represented as f64")]
    Cast,

    /// Error parsing SVG
    #[error("Rendering error: {0}")]
    SvgParse(#[from] usvg::Error),

    /// Error encoding PNG
    #[error("PNG encoding error: {0}")]
    PngEncode(String),
}

/// Colors used by a [`SweepChart`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    /// Canvas color
    pub background: RGBColor,

    /// The exact curve, `eˣ`
    pub true_color: RGBColor,

    /// The series, `Pₙ(x)`
    pub approx_color: RGBColor,

    /// The error curve and its fill
    pub error_color: RGBColor,

    /// Opacity of the area under the error curve
    pub error_fill_alpha: f64,
}
impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: WHITE,
            true_color: RGBColor(0x2A, 0x2A, 0x2A),
            approx_color: RGBColor(0x14, 0xB8, 0xA6),
            error_color: RGBColor(0xEF, 0x44, 0x44),
            error_fill_alpha: 0.1,
        }
    }
}

/// Layout of a [`SweepChart`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Caption for the main panel; defaults to `eˣ vs Pₙ(x)`
    pub title: Option<String>,

    /// Size of the output image in pixels
    pub size: (u32, u32),

    /// Share of the height given to the main panel, in percent
    pub main_panel_percent: u32,

    /// Y-axis range of the main panel; values outside it are clipped
    pub y_range: Range<f64>,

    /// Line width of both curves in the main panel
    pub line_width: u32,

    /// Dash length and gap for the series curve
    pub dash: (u32, u32),

    /// Number of labels on the x-axes
    pub x_axis_labels: usize,

    /// Margin around each panel, in pixels
    pub margin: i32,
}
impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: None,
            size: (800, 600),
            main_panel_percent: 65,
            y_range: -2.0..10.0,
            line_width: 2,
            dash: (6, 4),
            x_axis_labels: 9,
            margin: 10,
        }
    }
}

/// Renders sweeps as a main chart over an error chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepChart {
    theme: ChartTheme,
    options: PlotOptions,
}
impl SweepChart {
    /// Creates a chart with the given styling and layout
    #[must_use]
    pub fn new(theme: ChartTheme, options: PlotOptions) -> Self {
        Self { theme, options }
    }

    /// The colors this chart draws with
    #[must_use]
    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    /// The layout this chart draws with
    #[must_use]
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Draws the sweep as an SVG document
    ///
    /// # Errors
    /// Returns an error if a value cannot be represented as `f64`, or the chart cannot be drawn.
    pub fn render_svg<T: Value>(&self, sweep: &Sweep<T>) -> Result<String, PlottingError> {
        let true_curve = sweep.true_curve().as_f64().map_err(|_| PlottingError::Cast)?;
        let approx_curve = sweep.approx_curve().as_f64().map_err(|_| PlottingError::Cast)?;
        let error_curve = sweep.error_curve().as_f64().map_err(|_| PlottingError::Cast)?;

        let x_range = padded(x_bounds(&true_curve));
        let y_range = self.main_y_range();
        let error_range = padded(error_curve.y_range());

        let title = match &self.options.title {
            Some(title) => title.clone(),
            None => format!("eˣ vs {}", series_label(sweep.degree())),
        };

        let height = i32::try_from(self.options.size.1).map_err(|_| PlottingError::Cast)?;
        let percent = i32::try_from(self.options.main_panel_percent.min(100)).map_err(|_| PlottingError::Cast)?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.options.size).into_drawing_area();
            root.fill(&self.theme.background)?;
            let (main_area, error_area) = root.split_vertically(height * percent / 100);

            //
            // Main panel: exact vs approximate
            let mut chart = ChartBuilder::on(&main_area)
                .caption(&title, ("sans-serif", 20).into_font())
                .margin(self.options.margin)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(x_range.clone(), y_range.clone())?;

            chart
                .configure_mesh()
                .x_labels(self.options.x_axis_labels)
                .x_label_formatter(&|x| display::format_label(*x))
                .y_desc("y")
                .draw()?;

            let true_style = self.theme.true_color.stroke_width(self.options.line_width);
            chart
                .draw_series(LineSeries::new(clip_y(&true_curve, &y_range), true_style))?
                .label("eˣ")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], true_style));

            let approx_style = self.theme.approx_color.stroke_width(self.options.line_width);
            let (dash, gap) = self.options.dash;
            chart
                .draw_series(DashedLineSeries::new(
                    clip_y(&approx_curve, &y_range),
                    dash,
                    gap,
                    approx_style,
                ))?
                .label(series_label(sweep.degree()))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], approx_style));

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperLeft)
                .draw()?;

            //
            // Error panel
            let mut chart = ChartBuilder::on(&error_area)
                .margin(self.options.margin)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(x_range, error_range)?;

            chart
                .configure_mesh()
                .x_labels(self.options.x_axis_labels)
                .x_label_formatter(&|x| display::format_label(*x))
                .y_label_formatter(&|y| unicode::float(*y, None, 1))
                .x_desc("x")
                .y_desc("error")
                .draw()?;

            let error_points: Vec<_> = error_curve.into_iter().filter(|(_, y)| y.is_finite()).collect();
            let fill = self.theme.error_color.mix(self.theme.error_fill_alpha).filled();
            let border = self.theme.error_color.stroke_width(1);
            chart
                .draw_series(AreaSeries::new(error_points, 0.0, fill).border_style(border))?
                .label("eˣ - Pₙ(x)")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], border));

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperLeft)
                .draw()?;

            root.present()?;
        }

        Ok(svg)
    }

    /// Draws the sweep and writes it to `target` as a PNG
    ///
    /// System fonts are loaded to render the chart text.
    ///
    /// # Errors
    /// Returns an error if the chart cannot be drawn, rasterized, or written.
    pub fn render_png<T: Value>(&self, sweep: &Sweep<T>, target: impl AsRef<Path>) -> Result<(), PlottingError> {
        let svg = self.render_svg(sweep)?;

        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();

        let rtree = usvg::Tree::from_str(&svg, &opt)?;
        let pixmap_size = rtree.size().to_int_size();

        let mut pixmap = resvg::tiny_skia::Pixmap::new(pixmap_size.width(), pixmap_size.height())
            .ok_or(PlottingError::Cast)?;
        resvg::render(&rtree, usvg::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .save_png(target)
            .map_err(|e| PlottingError::PngEncode(e.to_string()))
    }

    /// Y-range of the main panel; an empty or inverted range falls back to the default
    fn main_y_range(&self) -> Range<f64> {
        let range = self.options.y_range.clone();
        if range.start < range.end {
            range
        } else {
            PlotOptions::default().y_range
        }
    }
}

fn series_label(degree: usize) -> String {
    format!("P{}(x)", unicode::subscript(&degree.to_string()))
}

/// Clamps y into `range`, dropping NaN points
fn clip_y(data: &[(f64, f64)], range: &Range<f64>) -> Vec<(f64, f64)> {
    data.iter()
        .filter(|(_, y)| !y.is_nan())
        .map(|&(x, y)| (x, y.max(range.start).min(range.end)))
        .collect()
}

fn x_bounds(data: &[(f64, f64)]) -> Option<Range<f64>> {
    let first = data.first()?.0;
    let last = data.last()?.0;
    Some(first..last)
}

/// Widens a range by 10% each way so curves don't touch the frame; empty data gets `-1..1`
fn padded(range: Option<Range<f64>>) -> Range<f64> {
    match range {
        Some(range) if range.end > range.start => {
            let pad = (range.end - range.start) * 0.1;
            range.start - pad..range.end + pad
        }
        Some(range) if range.start.is_finite() => {
            let pad = range.start.abs().max(1.0) * 0.1;
            range.start - pad..range.start + pad
        }
        _ => -1.0..1.0,
    }
}

/// Renders a [`Sweep`] to a PNG file with the default [`SweepChart`], and returns the path.
///
/// The file is named by [`crate::plot_filename!`]. The path is printed on success; on failure the
/// error is printed instead.
///
/// ```ignore
/// let sweep = maclaurin::run_sweep(-2.0, 2.0, 0.01, 9.0);
/// maclaurin::plot!(sweep);
/// maclaurin::plot!(sweep, prefix = "degree_9");
/// ```
#[macro_export]
macro_rules! plot {
    ($sweep:expr $(, prefix = $prefix:expr)?) => {{
        #[allow(unused_mut, unused_assignments)] let mut prefix: Option<String> = None;
        $( prefix = Some($prefix.to_string()); )?

        let path = $crate::plot_filename!(prefix);
        match $crate::plotting::SweepChart::default().render_png(&$sweep, &path) {
            Ok(()) => println!("Wrote plot to {}", path.display()),
            Err(e) => eprintln!("Failed to plot {}: {e}", path.display()),
        }
        path
    }};
}

/// Generate a filename for a plot: `target/plot_output/{prefix_}{file}_line_{line}.png`
///
/// Creates the necessary directories if they don't exist. The `TARGET_DIR` environment
/// variable overrides `target`.
///
/// `plot_filename!(Some("prefix"))` will prepend `prefix_` to the filename.
#[macro_export]
macro_rules! plot_filename {
    () => {
        $crate::plot_filename!(None::<&str>)
    };

    ($prefix:expr) => {{
        let prefix: Option<String> = $prefix.map(|s| s.to_string());
        let prefix = match prefix {
            Some(p) if !p.is_empty() => format!("{p}_"),
            _ => String::new(),
        };

        let file = file!().replace(['/', '\\'], "_");
        let line = line!();

        let target_dir = ::std::env::var("TARGET_DIR").unwrap_or_else(|_| "target".into());
        let plots_dir = ::std::path::Path::new(&target_dir).join("plot_output");
        let _ = ::std::fs::create_dir_all(&plots_dir);

        plots_dir.join(format!("{prefix}{file}_line_{line}.png"))
    }};
}
