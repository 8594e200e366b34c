use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
pub mod display;
pub mod error;
pub mod interrupt;
pub mod plot;

pub use error::{LoadError, RenderError};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const X_DESC: &str = "Time[seconds]";
pub const Y_DESC: &str = "Value[no dimension]";
pub const SAVE_NAME: &str = "graph.png";
pub const CHART_SIZE: (u32, u32) = (1600, 800);

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);
const POINT_SIZE: i32 = 5;
const LINE_ALPHA: f64 = 0.5;

/// One record of the input file, extra keys (e.g. `frequency`) are ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    pub channel: String,
    pub time: f64,
    pub value: f64,
}

/// The value time series of a channel, times and values are index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    /// channel of the last sample pushed, used as title
    pub channel: Option<String>,
}

impl Series {
    pub fn new(capacity: usize) -> Series {
        Series {
            times: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            channel: None,
        }
    }

    /// Init a Series from a newline-delimited JSON file.
    /// All the lines are read at once and the last line is always skipped,
    /// whatever it contains.
    pub fn from_jsonl(fin: &Path) -> Result<Series, LoadError> {
        let io_err = |source| LoadError::Io {
            path: fin.to_path_buf(),
            source,
        };
        let file = File::open(fin).map_err(io_err)?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<String>, _>>()
            .map_err(io_err)?;
        Series::from_lines(&lines)
    }

    /// Parses all the lines but the last one, see `from_jsonl`.
    /// Errors carry the 1-based line number.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Series, LoadError> {
        let (last, records) = match lines.split_last() {
            Some(split) => split,
            None => return Ok(Series::new(0)),
        };
        debug!("skipping final line {}: {:?}", lines.len(), last.as_ref());
        let mut series = Series::new(records.len());
        for (i, l) in records.iter().enumerate() {
            let sample: Sample =
                serde_json::from_str(l.as_ref()).map_err(|e| LoadError::from_json(i + 1, e))?;
            series.push(sample);
        }
        Ok(series)
    }

    pub fn push(&mut self, sample: Sample) {
        self.times.push(sample.time);
        self.values.push(sample.value);
        self.channel = Some(sample.channel);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// chart title, empty when no sample was loaded
    pub fn title(&self) -> &str {
        self.channel.as_deref().unwrap_or("")
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Draws the scatter with the translucent connecting line on any plotters backend.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        DB::ErrorType: 'static,
    {
        let (xmin, xmax) = padded_range(&self.times, 0.05);
        let (ymin, ymax) = padded_range(&self.values, 0.1);
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(self.title(), ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&RGBColor(230, 230, 230))
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 20))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        chart
            .draw_series(
                self.points()
                    .map(|p| Circle::new(p, POINT_SIZE, POINT_COLOR.filled())),
            )?
            .label("Points")
            .legend(|(x, y)| Circle::new((x, y), POINT_SIZE, POINT_COLOR.filled()));
        chart
            .draw_series(LineSeries::new(self.points(), &BLACK.mix(LINE_ALPHA)))?
            .label("Line")
            .legend(|(x, y)| {
                PathElement::new(vec![(x - 10, y), (x + 10, y)], &BLACK.mix(LINE_ALPHA))
            });

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        root.present()?;
        Ok(())
    }

    /// plots the series to png, overwriting fout
    pub fn plot_png(&self, fout: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(fout, CHART_SIZE).into_drawing_area();
        self.draw(&root).map_err(RenderError::backend)
    }

    /// plots the series to svg, overwriting fout
    pub fn plot_svg(&self, fout: &Path) -> Result<(), RenderError> {
        let root = SVGBackend::new(fout, CHART_SIZE).into_drawing_area();
        self.draw(&root).map_err(RenderError::backend)
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "channel: {}", self.title())?;
        writeln!(f, "time, value")?;
        for (t, v) in self.points() {
            writeln!(f, "{},{}", t, v)?
        }
        Ok(())
    }
}

/// None for an empty slice
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// Axis range with a margin of `fraction` of the span on each side.
/// Falls back to 0..1 for no data and to +-1 around a single value.
/// Both ends and the span stay finite, plotters cannot lay out an infinite axis.
pub fn padded_range(s: &[f64], fraction: f64) -> (f64, f64) {
    let (min, max) = match min_and_max(s) {
        None => return (0., 1.),
        Some((min, max)) if min == max => (min - 1., max + 1.),
        Some((min, max)) => {
            // scaled before subtracting, max - min alone overflows for wide spans
            let margin = max * fraction - min * fraction;
            (min - margin, max + margin)
        }
    };
    if (max - min).is_finite() {
        (min, max)
    } else {
        (min.max(-f64::MAX / 2.), max.min(f64::MAX / 2.))
    }
}
