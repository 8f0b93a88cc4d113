mod input;
mod options;
mod tiles;

use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use downhill::{RouteReport, SegmentDifficulty};
use input::Route;
use log::debug;
use options::{Cli, Command as CliCmd, LonLat, RouteArgs};
use serde::Serialize;
use std::io::Write;
use terrain::{
    rgbdem::{decode, locate},
    Profile, Raster, Sampling, C,
};
use textplots::{Chart, Plot, Shape};
use tiles::Tiles;

fn main() -> Result<(), AnyError> {
    let Cli { cmd } = Cli::parse();

    env_logger::init();

    match cmd {
        CliCmd::Stats(args) => print_json(&load_report(&args)?.stats),
        CliCmd::Score(args) => print_json(&load_report(&args)?.gain),
        CliCmd::Segments(args) => print_segments(&load_report(&args)?),
        CliCmd::Csv(args) => print_csv(&load_profile(&args)?),
        CliCmd::Json(args) => print_profile_json(&load_profile(&args)?),
        CliCmd::Plot(args) => {
            plot_ascii(&load_profile(&args)?);
            Ok(())
        }
        CliCmd::Locate { at, zoom } => print_locate(at, zoom),
        CliCmd::Decode { r, g, b } => {
            println!("{}", decode(r, g, b));
            Ok(())
        }
    }
}

fn load_profile(args: &RouteArgs) -> Result<Profile, AnyError> {
    let Route { path, elevations } = input::read_route(&args.path)?;
    let sampling = args.sampling();

    if let Some(tile_dir) = &args.tile_dir {
        let tiles = Tiles::new(tile_dir.clone(), args.zoom)?;
        let profile = Profile::builder()
            .path(path)
            .sampling(sampling)
            .build(&Raster::new(&tiles, args.zoom))?;
        debug!("profile used {} tiles", tiles.len());
        return Ok(profile);
    }

    let elevations = elevations.ok_or_else(|| {
        anyhow!("no elevation source, pass --tile-dir or use [lng, lat, elevation] positions")
    })?;
    let profile = Profile::from_parts(path, elevations)?;
    match sampling {
        Sampling::All => Ok(profile),
        Sampling::Stride(k) => Ok(profile.stride(k)),
        Sampling::Resample { .. } => Err(anyhow!("--step requires --tile-dir")),
    }
}

fn load_report(args: &RouteArgs) -> Result<RouteReport, AnyError> {
    Ok(RouteReport::from(load_profile(args)?))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AnyError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn print_segments(report: &RouteReport) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        start: [C; 2],
        end: [C; 2],
        slope: C,
        difficulty: SegmentDifficulty,
    }

    let reshaped: Vec<JsonEntry> = report
        .segments
        .iter()
        .map(|segment| JsonEntry {
            start: [segment.start.x, segment.start.y],
            end: [segment.end.x, segment.end.y],
            slope: segment.slope,
            difficulty: segment.difficulty,
        })
        .collect();
    print_json(&reshaped)
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- csv route.geojson --tile-dir=tiles --step=15 | tr ',' ' ' > /tmp/plot && gnuplot -p -e "plot '/tmp/plot' using 1:4 with lines"
/// ```
fn print_csv(profile: &Profile) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Longitude,Latitude,Elevation")?;
    for ((distance, point), elevation) in profile
        .distances_m()
        .iter()
        .zip(profile.points.iter())
        .zip(profile.elevations.iter())
    {
        let longitude = point.x;
        let latitude = point.y;
        writeln!(stdout, "{distance},{longitude},{latitude},{elevation}")?;
    }
    Ok(())
}

fn print_profile_json(profile: &Profile) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        location: [C; 2],
        elevation: C,
    }

    let reshaped: Vec<JsonEntry> = profile
        .points
        .iter()
        .zip(profile.elevations.iter())
        .map(|(point, elev)| JsonEntry {
            location: [point.x, point.y],
            elevation: *elev,
        })
        .collect();
    let json = serde_json::to_string(&reshaped)?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(profile: &Profile) {
    if profile.is_empty() {
        return;
    }
    let plot_data: Vec<(f32, f32)> = profile
        .distances_m()
        .into_iter()
        .zip(profile.elevations.iter())
        .map(|(distance, elev)| (distance as f32, *elev as f32))
        .collect();
    Chart::new(300, 150, 0.0, profile.distance_m as f32)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}

fn print_locate(LonLat(coord): LonLat, zoom: u8) -> Result<(), AnyError> {
    let addr = locate(coord.x, coord.y, zoom);
    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{}/{}/{} pixel ({}, {})",
        addr.zoom, addr.x, addr.y, addr.pixel_x, addr.pixel_y
    )?;
    Ok(())
}
