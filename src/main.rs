use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zplot::{
    ComplexNumber,
    error::SyntaxError,
    plane::{
        plot::Plot,
        sampler::{GridConfig, Line},
    },
};

/// zplot evaluates a complex transformation `z -> f(z)` at a point or over a
/// grid of lines in the complex plane.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The expression to evaluate, for example `gamma(z)` or `z^2 + 1`.
    expression: String,

    /// Evaluates the expression at the point RE + IM i.
    #[arg(long, num_args = 2, value_names = ["RE", "IM"], allow_negative_numbers = true)]
    at: Option<Vec<f64>>,

    /// Samples the expression over a grid of lines and prints every line.
    #[arg(short, long)]
    grid: bool,

    /// Samples grid lines in parallel.
    #[arg(short, long, requires = "grid")]
    parallel: bool,

    /// Half of the horizontal extent of the grid.
    #[arg(long, default_value_t = GridConfig::default().half_range)]
    half_range: f64,

    /// Width over height of the grid.
    #[arg(long, default_value_t = GridConfig::default().aspect)]
    aspect: f64,

    /// Distance between neighbouring grid lines.
    #[arg(long, default_value_t = GridConfig::default().line_step)]
    line_step: f64,

    /// Distance between neighbouring samples along a line.
    #[arg(long, default_value_t = GridConfig::default().sample_step)]
    sample_step: f64,

    /// Morph progress from the original grid (0) to the transformed one (1).
    #[arg(short, long, default_value_t = 1.0)]
    t: f64,
}

impl Args {
    const fn grid_config(&self) -> GridConfig {
        GridConfig { half_range:  self.half_range,
                     aspect:      self.aspect,
                     line_step:   self.line_step,
                     sample_step: self.sample_step, }
    }
}

fn report_syntax_error(source: &str, err: &SyntaxError) {
    eprintln!("{err}");
    eprintln!("  {source}");
    eprintln!("  {}^", " ".repeat(err.offset));
}

fn print_line(label: &str, line: &Line, t: f64) {
    let points = line.iter()
                     .map(|point| format!("({})", point.at(t)))
                     .collect::<Vec<_>>()
                     .join(" ");
    println!("{label}: {points}");
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let plot = Plot::from_source(&args.expression).unwrap_or_else(|e| {
                                                       eprintln!("{e}");
                                                       process::exit(1);
                                                   });

    if let Some(err) = plot.error() {
        report_syntax_error(plot.source(), err);
        if !args.grid {
            process::exit(1);
        }
        eprintln!("plotting {} instead", plot.expression());
    }

    if args.at.is_none() && !args.grid {
        println!("{}", plot.expression());
    }

    if let Some(at) = &args.at {
        let z = ComplexNumber::new(at[0], at[1]);
        match plot.evaluate(z) {
            Ok(value) => println!("f({z}) = {value}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            },
        }
    }

    if args.grid {
        let config = args.grid_config();
        let sampled = if args.parallel {
            plot.sample_parallel(&config)
        } else {
            plot.sample(&config)
        };
        let grid = sampled.unwrap_or_else(|e| {
                              eprintln!("{e}");
                              process::exit(1);
                          });

        for (i, line) in grid.vertical.iter().enumerate() {
            print_line(&format!("vertical {i}"), line, args.t);
        }
        for (i, line) in grid.horizontal.iter().enumerate() {
            print_line(&format!("horizontal {i}"), line, args.t);
        }
        println!("{} invalid samples", grid.invalid_count());
    }
}
