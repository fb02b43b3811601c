//! Command-line front end for the zone engine.
//!
//! ```text
//! msp-zones measure <distance|area> <lat,lon>...
//! msp-zones summary <project.json>
//! msp-zones export <project.json> <format> <output>
//! msp-zones import <project.json> <file>
//! msp-zones store <project.json>
//! msp-zones projects
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use msp_zones::AppConfig;

    let config = AppConfig::load_from_default_path().unwrap_or_default();

    // RUST_LOG wins over the configured level
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = cli::run(&config, &args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// The engine is a library on WASM; the host page drives it
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::Path;

    use msp_zones::format::{
        DefaultShapeParser, ExportOptions, ImportExportGateway, ImportOptions, NATIVE_FORMAT_ID,
        TextReportRenderer, read_project,
    };
    use msp_zones::persistence::LocalStore;
    use msp_zones::{
        AppConfig, Coordinate, MeasureMode, MeasurementSession, Project, ProjectManager,
        ShapeStore,
    };

    type CliResult = Result<(), Box<dyn std::error::Error>>;

    const USAGE: &str = "usage: msp-zones <measure|summary|export|import|store|projects> [args...]";

    pub fn run(config: &AppConfig, args: &[String]) -> CliResult {
        let (command, rest) = args.split_first().ok_or(USAGE)?;
        match (command.as_str(), rest) {
            ("measure", [mode, points @ ..]) => measure(mode, points),
            ("summary", [project]) => summary(Path::new(project)),
            ("export", [project, format, output]) => {
                export(Path::new(project), format, Path::new(output))
            }
            ("import", [project, file]) => import(config, Path::new(project), Path::new(file)),
            ("store", [project]) => store(config, Path::new(project)),
            ("projects", []) => projects(config),
            _ => Err(USAGE.into()),
        }
    }

    fn measure(mode: &str, points: &[String]) -> CliResult {
        let mode = match mode {
            "distance" => MeasureMode::Distance,
            "area" => MeasureMode::Area,
            other => return Err(format!("unknown measurement mode '{}'", other).into()),
        };

        let mut session = MeasurementSession::new();
        session.start(mode);
        for text in points {
            let point: Coordinate = text.parse()?;
            session.add_point(point);
        }

        let summary = session.summary().ok_or("no points given")?;
        println!("{} over {} points", mode.name(), summary.points.len());
        if let Some(d) = summary.distance_km {
            println!("  distance: {:.3} km", d);
        }
        if let Some(b) = summary.bearing_deg {
            println!("  bearing:  {:.1}°", b);
        }
        if let Some(a) = summary.area_km2 {
            println!("  area:     {:.3} km²", a);
        }
        Ok(())
    }

    fn read_project_file(path: &Path) -> Result<Project, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)?;
        Ok(read_project(&bytes)?)
    }

    fn summary(path: &Path) -> CliResult {
        let project = read_project_file(path)?;
        let bytes = ImportExportGateway::new().export_report(&project, &TextReportRenderer)?;
        print!("{}", String::from_utf8_lossy(&bytes));
        Ok(())
    }

    fn export(path: &Path, format: &str, output: &Path) -> CliResult {
        let project = read_project_file(path)?;
        let result = ImportExportGateway::new().export_to_path(
            &project,
            format,
            output,
            &ExportOptions::default(),
        )?;
        for warning in &result.warnings {
            eprintln!("warning: {}", warning.message);
        }
        println!("Exported {} zones to {}", result.shapes_exported, output.display());
        Ok(())
    }

    fn import(config: &AppConfig, path: &Path, file: &Path) -> CliResult {
        let mut project = read_project_file(path)?;
        let mut store = ShapeStore::with_config(config.preferences.undo_config());
        store.reset(std::mem::take(&mut project.shapes));

        let options = ImportOptions::new().default_zone(config.preferences.default_zone);
        let gateway = ImportExportGateway::with_parser(DefaultShapeParser::with_options(options));
        let summary = gateway.import_path(file, &mut store)?;
        if let Some(message) = &summary.message {
            eprintln!("note: {}", message);
        }

        project.shapes = store.shapes().to_vec();
        project.touch();
        gateway.export_to_path(&project, NATIVE_FORMAT_ID, path, &ExportOptions::default())?;
        println!(
            "Imported {} zones into {} ({} total)",
            summary.ids.len(),
            path.display(),
            store.len()
        );
        Ok(())
    }

    fn local_manager(
        config: &AppConfig,
    ) -> Result<ProjectManager<LocalStore>, Box<dyn std::error::Error>> {
        let local = match config.local_store_path() {
            Some(path) => LocalStore::open(path)?,
            None => LocalStore::in_memory(),
        };
        Ok(
            ProjectManager::with_config(local, config.preferences.undo_config())
                .with_researcher(config.preferences.researcher.clone()),
        )
    }

    fn store(config: &AppConfig, path: &Path) -> CliResult {
        let project = read_project_file(path)?;
        let mut manager = local_manager(config)?;
        pollster::block_on(manager.load(&project))?;
        let id = pollster::block_on(manager.save())?;
        println!("Saved '{}' as {}", manager.project().name, id);
        Ok(())
    }

    fn projects(config: &AppConfig) -> CliResult {
        let mut manager = local_manager(config)?;
        let listing = pollster::block_on(manager.list_projects())?;
        if listing.is_empty() {
            println!("No saved projects");
        }
        for project in listing {
            println!(
                "{}  {}  {} zones  modified {}",
                project.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
                project.name,
                project.shapes.len(),
                project.modified_at.format("%Y-%m-%d %H:%M")
            );
        }
        Ok(())
    }
}
