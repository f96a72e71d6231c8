//! Panel Orientation Tool
//!
//! Reads the four corners of one or more rectangular detector panels and
//! prints the panel center, orientation matrix, Euler angles and the
//! `<location>` element for an instrument definition file.
//!
//! Usage:
//!   cargo run --bin panel_orient -- --corners 0 0 0 0 1 0 1 1 0 1 0 0
//!   cargo run --bin panel_orient -- --convention yzy --json --file panels.csv
//!
//! Library log records go to stderr; select them with `RUST_LOG` or `--verbose`.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use serde::Serialize;

use panelgeom::constants::{ANGLE_TOLERANCE, RAD2DEG, TOLERANCE};
use panelgeom::panel::{read_panels, PanelRecord};
use panelgeom::{
    AngleUnit, EulerConvention, GoniometerAngles, Location, RectangleCorners, Tolerances, Vector3,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Panel Orientation Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes the orientation of rectangular detector panels from their corners",
    long_about = None
)]
struct Args {
    /// Euler convention of the reported angles (zyz or yzy)
    #[arg(short, long, default_value = "zyz")]
    convention: EulerConvention,

    /// Print results as JSON
    #[arg(short, long, action = ArgAction::SetTrue)]
    json: bool,

    /// Length tolerance for corner validation
    #[arg(long, default_value_t = TOLERANCE)]
    tolerance_len: f64,

    /// Angle tolerance in degrees below which rotations are omitted
    #[arg(long, default_value_t = ANGLE_TOLERANCE)]
    tolerance_ang: f64,

    /// Twelve corner coordinates: p1 p2 p3 p4 (lower-left, upper-left,
    /// upper-right, lower-right)
    #[arg(
        long,
        num_args = 12,
        allow_negative_numbers = true,
        value_name = "COORD",
        conflicts_with = "file",
        required_unless_present = "file"
    )]
    corners: Option<Vec<f64>>,

    /// File with one panel per line (optional name followed by 12 numbers)
    #[arg(short, long)]
    file: Option<String>,

    /// Show debug log records from the solver
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Everything reported for one panel
#[derive(Debug, Serialize)]
struct PanelReport {
    name: Option<String>,
    center: [f64; 3],
    width: f64,
    height: f64,
    orientation: [[f64; 3]; 3],
    convention: String,
    euler_degrees: [f64; 3],
    goniometer: GoniometerAngles,
    location: Location,
}

impl PanelReport {
    fn new(
        name: Option<String>,
        panel: &RectangleCorners,
        convention: EulerConvention,
    ) -> Result<Self> {
        let m = panel.orientation();
        let mut orientation = [[0.0; 3]; 3];
        for (r, row) in orientation.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = m[(r, c)];
            }
        }

        Ok(PanelReport {
            name,
            center: panel.center().to_array(),
            width: panel.width(),
            height: panel.height(),
            orientation,
            convention: convention.to_string(),
            euler_degrees: panel.euler_angles(convention).map(|a| a * RAD2DEG),
            goniometer: panel.goniometer_angles(AngleUnit::Degrees)?,
            location: panel.location(convention)?,
        })
    }

    fn print(&self) {
        println!("\n{}:", self.name.as_deref().unwrap_or("panel"));
        println!("-------------------------------------------------------");
        println!(
            "center: ({:.6}, {:.6}, {:.6})",
            self.center[0], self.center[1], self.center[2]
        );
        println!("size: {:.6} x {:.6}", self.width, self.height);
        println!("orientation:");
        for row in &self.orientation {
            println!("  [{:>10.6} {:>10.6} {:>10.6}]", row[0], row[1], row[2]);
        }
        println!(
            "{} angles (deg): {:.6}, {:.6}, {:.6}",
            self.convention, self.euler_degrees[0], self.euler_degrees[1], self.euler_degrees[2]
        );
        println!(
            "goniometer (deg): phi {:.6} chi {:.6} omega {:.6}",
            self.goniometer.phi, self.goniometer.chi, self.goniometer.omega
        );
        print!("{}", self.location.to_xml());
    }
}

/// Collects the panels named on the command line or in the input file
fn load_records(args: &Args) -> Result<Vec<PanelRecord>> {
    if let Some(path) = &args.file {
        let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path, e))?;
        return Ok(read_panels(BufReader::new(file))?);
    }

    let Some(values) = args.corners.as_deref() else {
        return Err("either --corners or --file is required".into());
    };
    let corner = |n: usize| Vector3::new(values[3 * n], values[3 * n + 1], values[3 * n + 2]);
    Ok(vec![PanelRecord {
        name: None,
        corners: [corner(0), corner(1), corner(2), corner(3)],
    }])
}

fn run(args: &Args) -> Result<()> {
    let tolerances = Tolerances::default()
        .with_length(args.tolerance_len)
        .with_angle(args.tolerance_ang);

    let records = load_records(args)?;
    if records.is_empty() {
        return Err("no panels found in input".into());
    }

    let mut reports = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let label = record
            .name
            .clone()
            .unwrap_or_else(|| format!("panel {}", index + 1));
        let [p1, p2, p3, p4] = record.corners;
        let panel = RectangleCorners::with_tolerances(p1, p2, p3, p4, tolerances)
            .map_err(|e| format!("{}: {}", label, e))?;
        reports.push(PanelReport::new(record.name, &panel, args.convention)?);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            report.print();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
