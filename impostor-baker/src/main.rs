/// Offline cube impostor baker entry point
use impostor_baker::capture::{CaptureBounds, CaptureDirectory, discover_capture_dirs};
use impostor_baker::export::{FRAMES_FILE, ImpostorExporter, write_frames};
use impostor_baker::{BakeError, BakeSettings, ImpostorBaker, compute_frames};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::env;
use std::path::Path;

const OUTPUT_DIR: &str = "impostor";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    match parse_command(&args) {
        Some(Command::Bake { captures, settings }) => {
            let settings = load_settings(settings)?;
            bake_all(captures, settings)
        }
        Some(Command::Frames { bounds }) => export_frames(bounds),
        None => {
            eprintln!("Usage: {} bake <captures> [settings.json]", args[0]);
            eprintln!("       {} frames <bounds.json>", args[0]);
            std::process::exit(1);
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Bake {
        captures: &'a Path,
        settings: Option<&'a Path>,
    },
    Frames {
        bounds: &'a Path,
    },
}

fn parse_command(args: &[String]) -> Option<Command<'_>> {
    match (args.get(1).map(String::as_str), &args[args.len().min(2)..]) {
        (Some("bake"), [captures]) => Some(Command::Bake {
            captures: Path::new(captures),
            settings: None,
        }),
        (Some("bake"), [captures, settings]) => Some(Command::Bake {
            captures: Path::new(captures),
            settings: Some(Path::new(settings)),
        }),
        (Some("frames"), [bounds]) => Some(Command::Frames {
            bounds: Path::new(bounds),
        }),
        _ => None,
    }
}

fn load_settings(path: Option<&Path>) -> Result<BakeSettings, Box<dyn std::error::Error>> {
    let settings = match path {
        Some(path) => BakeSettings::from_json_file(path)?,
        None => BakeSettings::default(),
    };
    Ok(settings.validated()?)
}

/// Bakes every capture directory under `root`. Bakes share nothing, so they
/// run in parallel; one failure does not stop the others.
fn bake_all(root: &Path, settings: BakeSettings) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = discover_capture_dirs(root)?;
    if candidates.is_empty() {
        return Err(format!("No capture directories found in {}", root.display()).into());
    }

    let baker = ImpostorBaker::new(settings)?;

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} impostors ({percent}%) {msg}")?
            .progress_chars("█▉▊▋▌▍▎▏"),
    );
    pb.set_message("Baking impostors");

    let failures: Vec<String> = candidates
        .into_par_iter()
        .filter_map(|mut capture| {
            let result = bake_one(&baker, &mut capture);
            pb.inc(1);
            result.err().map(|e| format!("{}: {}", capture.name, e))
        })
        .collect();

    pb.finish_with_message("Impostors baked");

    if failures.is_empty() {
        println!("Impostor baking complete!");
        Ok(())
    } else {
        for failure in &failures {
            log::error!("{}", failure);
        }
        Err(format!("{} impostor(s) failed to bake", failures.len()).into())
    }
}

fn bake_one(baker: &ImpostorBaker, capture: &mut CaptureDirectory) -> Result<(), BakeError> {
    let bounds = capture.bounds()?;
    let bake = baker.bake(&bounds, capture)?;

    let exporter = ImpostorExporter::new(&capture.path.join(OUTPUT_DIR), &capture.name);
    let manifest = exporter.export(&bake)?;
    manifest.print_summary();
    Ok(())
}

fn export_frames(bounds_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = CaptureBounds::from_json_file(bounds_path)?.resolve();
    let frames = compute_frames(&bounds);

    let output = bounds_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(FRAMES_FILE);
    write_frames(&output, &frames)?;

    for (face, frame) in frames.iter() {
        println!(
            "  {:?}: position ({:.3}, {:.3}, {:.3}) ortho {:.4}{}",
            face,
            frame.position.x,
            frame.position.y,
            frame.position.z,
            frame.ortho_half_extent,
            if frame.rolled { " (rolled 180)" } else { "" }
        );
    }
    Ok(())
}
