use genui_render::layout::css;
use genui_render::{
    arrange, default_registry, default_resolver, GenUiError, RenderConfig, RenderedNode,
    ScreenSize, TreeRenderer,
};
use serde_json::Value;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn usage() {
    eprintln!("Usage: genui-inspect [--config <file.yaml>] [--screen <size>] <file.json>...");
    eprintln!("       genui-inspect --components");
    eprintln!("       genui-inspect [--screen <size>] --layout <type,type,...>");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  genui-inspect dashboard.json");
    eprintln!("  genui-inspect --screen mobile *.json");
    eprintln!("  genui-inspect --layout card,chart,table");
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("genui_render=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

enum Mode {
    Render(Vec<String>),
    Components,
    Layout(Vec<String>),
}

struct Options {
    config: RenderConfig,
    mode: Mode,
}

fn parse_args(args: &[String]) -> Result<Options, GenUiError> {
    let mut config_path = None;
    let mut screen = None;
    let mut files = Vec::new();
    let mut mode = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| GenUiError::InvalidConfig("--config needs a path".to_string()))?;
                config_path = Some(path.clone());
            }
            "--screen" => {
                let value = iter
                    .next()
                    .ok_or_else(|| GenUiError::InvalidConfig("--screen needs a size".to_string()))?;
                screen = Some(value.parse::<ScreenSize>().map_err(GenUiError::InvalidConfig)?);
            }
            "--components" => mode = Some(Mode::Components),
            "--layout" => {
                let value = iter.next().ok_or_else(|| {
                    GenUiError::InvalidConfig("--layout needs a comma separated type list".to_string())
                })?;
                let types = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
                mode = Some(Mode::Layout(types));
            }
            other => files.push(other.to_string()),
        }
    }

    let mut config = match config_path {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(screen) = screen {
        config = config.with_screen(screen);
    }

    let mode = match mode {
        Some(mode) => mode,
        None if files.is_empty() => {
            return Err(GenUiError::InvalidConfig("no input files".to_string()))
        }
        None => Mode::Render(files),
    };

    Ok(Options { config, mode })
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        usage();
        process::exit(1);
    }

    setup_logging();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("✗ {}", e);
            eprintln!();
            usage();
            process::exit(1);
        }
    };

    let exit_code = match options.mode {
        Mode::Components => print_json(&default_registry().snapshot().help_panel()),
        Mode::Layout(types) => {
            let layout = arrange(&types, options.config.screen);
            let code = print_json(&layout);
            print!("{}", css::stylesheet(&layout));
            code
        }
        Mode::Render(files) => {
            let mut exit_code = 0;
            for file_path in files {
                match render_file(&file_path, &options.config) {
                    Ok(node) => {
                        let problems = node.placeholder_count();
                        if problems == 0 {
                            eprintln!("✓ {} rendered", file_path);
                        } else {
                            eprintln!("✓ {} rendered with {} placeholder(s)", file_path, problems);
                        }
                        if print_json(&node) != 0 {
                            exit_code = 1;
                        }
                    }
                    Err(e) => {
                        eprintln!("✗ {} failed:", file_path);
                        print_error(&e);
                        exit_code = 1;
                    }
                }
            }
            exit_code
        }
    };

    process::exit(exit_code);
}

fn render_file(path: &str, config: &RenderConfig) -> Result<RenderedNode, GenUiError> {
    let content = fs::read_to_string(path)
        .map_err(|e| GenUiError::InvalidConfig(format!("Failed to read file: {}", e)))?;
    let root: Value = serde_json::from_str(&content)?;
    TreeRenderer::new(default_registry().snapshot(), default_resolver(), config.clone()).render(&root)
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("✗ Failed to serialize output: {}", e);
            1
        }
    }
}

fn print_error(error: &GenUiError) {
    match error {
        GenUiError::RendererResolution {
            component_type,
            reason,
        } => {
            eprintln!("  No renderer for '{}':", component_type);
            eprintln!("    {}", reason);
        }
        GenUiError::Json(msg) => {
            eprintln!("  Not valid JSON:");
            eprintln!("    {}", msg);
        }
        GenUiError::InvalidConfig(msg) => {
            eprintln!("  {}", msg);
        }
        other => {
            eprintln!("  {}", other);
        }
    }
}
