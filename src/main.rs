use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridmapper::app::{editor_defaults, export_options, open_store};
use gridmapper::designer::{NewMapOutcome, UnsavedChanges};
use gridmapper::{
    init_logging, Config, EditorState, ExportFormat, HexColor, MapRecord, PointerButton,
    PointerEvent, ShapeKind, SizeCategory, SubCell, Tool, UserId,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gridmapper", version, about = "Grid-based tabletop map builder")]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List saved maps, newest first
    List,
    /// Render a saved map to an image
    Export {
        /// Map name or id
        map: String,
        /// png, jpeg or pdf
        #[arg(long, value_parser = parse_format)]
        format: Option<ExportFormat>,
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build and save a small sample map
    Demo {
        /// Name to save the sample under
        #[arg(long, default_value = "Demo Camp")]
        name: String,
    },
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: gridmapper::core::ValidationError| e.to_string())
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => gridmapper::settings::default_config_path()?,
    };
    Config::load_or_default(&path).with_context(|| format!("Failed to load {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    info!(
        version = gridmapper::VERSION,
        built = gridmapper::BUILD_DATE,
        "starting"
    );

    let store = open_store(&config.storage);
    let mut editor = EditorState::new(store, UserId::guest(), editor_defaults(&config)?);

    match cli.command {
        Command::List => {
            for map in editor.list_maps().await? {
                println!(
                    "{}  {:<24} {}x{} @{}px  updated {}",
                    map.id,
                    map.name,
                    map.grid_width,
                    map.grid_height,
                    map.cell_size.pixels(),
                    map.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Command::Export { map, format, out } => {
            let record = find_map(&editor, &map).await?;
            editor.load_map(record.id).await?;
            let options = export_options(&config.export, format, out)?;
            let report = editor.export(&options)?;
            println!("{}", report.path.display());
            if let Some(notice) = report.notice {
                eprintln!("{notice}");
            }
        }
        Command::Demo { name } => {
            let saved = build_demo(&mut editor, &name).await?;
            println!(
                "Saved '{}' ({} elements) as {}",
                saved.name,
                editor.canvas.element_count(),
                saved.id
            );
        }
    }

    editor.flush().await;
    Ok(())
}

async fn find_map(editor: &EditorState, key: &str) -> Result<MapRecord> {
    let maps = editor.list_maps().await?;
    let found = maps
        .into_iter()
        .find(|m| m.id.to_string() == key || m.name == key);
    match found {
        Some(map) => Ok(map),
        None => bail!("No map named or with id '{}'", key),
    }
}

/// Paint a small campsite through the same pointer path the editor uses.
async fn build_demo(editor: &mut EditorState, name: &str) -> Result<MapRecord> {
    if editor.new_map(UnsavedChanges::Discard).await? != NewMapOutcome::Reset {
        bail!("could not start a new map");
    }
    let cell = f64::from(editor.canvas.cell_size().pixels());
    let center = |x: i32, y: i32| {
        (
            f64::from(x) * cell + cell / 2.0,
            f64::from(y) * cell + cell / 2.0,
        )
    };

    editor.set_tool(Tool::Place);
    editor.set_size(SizeCategory::Medium);
    editor.set_shape(Some(ShapeKind::Wall));
    editor.pick_color(HexColor::from_rgb(0x55, 0x55, 0x55));
    let (x0, y0) = center(2, 2);
    let (x1, y1) = center(12, 2);
    editor.handle_pointer(PointerEvent::down(PointerButton::Left, x0, y0));
    let steps = 10;
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        editor.handle_pointer(PointerEvent::moved(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
    }
    editor.handle_pointer(PointerEvent::up(PointerButton::Left, x1, y1));

    editor.set_shape(Some(ShapeKind::Campsite));
    editor.set_size(SizeCategory::Large);
    let (cx, cy) = center(6, 6);
    editor.handle_pointer(PointerEvent::down(PointerButton::Left, cx, cy));
    editor.handle_pointer(PointerEvent::up(PointerButton::Left, cx, cy));

    editor.set_tool(Tool::Text);
    editor.set_text("1");
    editor.set_size(SizeCategory::Tiny);
    let quarter = cell / 4.0;
    for sub in SubCell::all() {
        let (x, y) = (
            10.0 * cell + f64::from(sub.x()) * cell / 2.0 + quarter,
            8.0 * cell + f64::from(sub.y()) * cell / 2.0 + quarter,
        );
        editor.handle_pointer(PointerEvent::down(PointerButton::Left, x, y));
        editor.handle_pointer(PointerEvent::up(PointerButton::Left, x, y));
    }

    Ok(editor.save_map(name).await?)
}
