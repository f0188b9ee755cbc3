use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use polybez::kurbo::Shape;
use polybez::{ChainConfig, ChainPath, ErrorMetric};

#[derive(Parser)]
#[command(name = "polybez", about = "Cubic polynomial chains to bezier paths")]
struct Cli {
    /// Chain description (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Chain position of the terminal segment (defaults to the last one)
    #[arg(short, long)]
    segment: Option<usize>,

    /// How segment fit error is measured
    #[arg(long, value_enum, default_value = "max")]
    metric: Metric,

    /// Largest X gap between linked segments before a warning is logged
    #[arg(long, default_value = "1e-9")]
    tolerance: f64,

    /// Print samples of the terminal segment at this X spacing
    #[arg(long)]
    sample: Option<f64>,

    /// Write the assembled path as an SVG file
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Metric {
    /// Largest squared deviation
    Max,
    /// Squared deviations summed, divided by segment width
    Mean,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = ChainConfig {
        metric: match cli.metric {
            Metric::Max => ErrorMetric::MaxSquared,
            Metric::Mean => ErrorMetric::MeanSquared,
        },
        continuity_tolerance: cli.tolerance,
    };

    let chain = polybez::input::load_chain(&cli.input, config)?;
    let terminal = cli.segment.unwrap_or_else(|| chain.terminal());
    eprintln!("  Load        {} segments from {}", chain.len(), cli.input.display());

    let ancestry = chain.ancestry(terminal)?;
    eprintln!("  Lineage     {} segments ending at {}", ancestry.len(), terminal);
    for &i in &ancestry {
        eprintln!("    [{}] {}", i, chain.report(i)?);
    }
    eprintln!("{}", chain.summary(terminal)?);

    if let (Some(dist), Some(segment)) = (cli.sample, chain.get(terminal)) {
        let samples = segment.sample(dist)?;
        eprintln!("  Sample      {} points at spacing {}", samples.len(), dist);
        for p in samples {
            println!("{}\t{}", p.x, p.y);
        }
    }

    let path = chain.path_to(terminal)?;
    eprintln!(
        "  Path        {} curves from ({:.2}, {:.2})",
        path.len(),
        path.start().x,
        path.start().y
    );

    if let Some(ref out) = cli.svg {
        write_svg(&path, out)?;
        eprintln!("Wrote {}", out.display());
    }
    Ok(())
}

/// Minimal standalone SVG with Y pointing up.
fn write_svg(path: &ChainPath, out: &Path) -> std::io::Result<()> {
    let bounds = path.bez_path().bounding_box();
    let margin = (bounds.width().max(bounds.height()) * 0.05).max(1.0);
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n  \
         <path transform=\"scale(1,-1)\" d=\"{}\" fill=\"none\" stroke=\"black\" vector-effect=\"non-scaling-stroke\"/>\n\
         </svg>\n",
        bounds.x0 - margin,
        -bounds.y1 - margin,
        bounds.width() + 2.0 * margin,
        bounds.height() + 2.0 * margin,
        path.to_svg(),
    );
    std::fs::write(out, svg)
}
