use addrplate::render::raster::{RasterError, RasterOptions};
use addrplate::render::{HeadlessError, PlateRenderer, load_glyphs};
use addrplate::{GeometryTable, PlateKind, PlateRequest, SizeClass};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

const GLYPHS_ENV: &str = "ADDRPLATE_GLYPHS";
const DEFAULT_GLYPHS: &str = "glyphs.json";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Input(addrplate::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<addrplate::Error> for CliError {
    fn from(value: addrplate::Error) -> Self {
        Self::Input(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Render(PlateKind),
    Layout(PlateKind),
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Pdf,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    wide: bool,
    pretty: bool,
    glyphs: Option<String>,
    geometry: Option<String>,
    render_format: RenderFormat,
    render_scale: f32,
    out: Option<String>,
    street_type: Option<String>,
    street_name: Option<String>,
    street_translit: Option<String>,
    house_num: Option<String>,
    left_num: Option<String>,
    right_num: Option<String>,
}

fn usage() -> &'static str {
    "addrplate\n\
\n\
USAGE:\n\
  addrplate [OPTIONS] name --street-type <s> --street-name <s> --street-translit <s>\n\
  addrplate [OPTIONS] number --house-num <s> [--left-num <s>] [--right-num <s>]\n\
  addrplate [OPTIONS] vertical --street-type <s> --street-name <s> --street-translit <s> --house-num <s>\n\
  addrplate [OPTIONS] layout <name|number|vertical> [--pretty] <plate arguments>\n\
\n\
OPTIONS:\n\
  --wide                 large plates (wide streets)\n\
  --glyphs <path>        glyph asset (default: $ADDRPLATE_GLYPHS, then ./glyphs.json)\n\
  --geometry <path>      plate geometry table override (JSON)\n\
  --format svg|pdf|png   output format (default: svg)\n\
  --scale <n>            PNG pixels per point (default: 1)\n\
  --out <path>           output file (default: stdout)\n\
\n\
NOTES:\n\
  - Underscore spellings (--street_type, --house_num, ...) are accepted too.\n\
  - An empty --left-num/--right-num means there is no neighbor on that side.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };
    let mut layout_pending = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let flag = a.replace('_', "-");
        let mut value = || it.next().cloned().ok_or(CliError::Usage(usage()));
        match flag.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--wide" => args.wide = true,
            "--pretty" => args.pretty = true,
            "--glyphs" => args.glyphs = Some(value()?),
            "--geometry" => args.geometry = Some(value()?),
            "--format" => {
                args.render_format = value()?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = value()?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--out" => args.out = Some(value()?),
            "--street-type" => args.street_type = Some(value()?),
            "--street-name" => args.street_name = Some(value()?),
            "--street-translit" => args.street_translit = Some(value()?),
            "--house-num" => args.house_num = Some(value()?),
            "--left-num" => args.left_num = Some(value()?),
            "--right-num" => args.right_num = Some(value()?),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            word => {
                if args.command.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                if layout_pending {
                    let kind = word
                        .parse::<PlateKind>()
                        .map_err(|_| CliError::Usage(usage()))?;
                    args.command = Some(Command::Layout(kind));
                    layout_pending = false;
                } else if word == "layout" {
                    layout_pending = true;
                } else {
                    let kind = word
                        .parse::<PlateKind>()
                        .map_err(|_| CliError::Usage(usage()))?;
                    args.command = Some(Command::Render(kind));
                }
            }
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn build_request(kind: PlateKind, args: &Args) -> PlateRequest {
    let size = if args.wide {
        SizeClass::Large
    } else {
        SizeClass::Compact
    };
    PlateRequest {
        street_type: args.street_type.clone(),
        street_name: args.street_name.clone(),
        street_translit: args.street_translit.clone(),
        house_number: args.house_num.clone(),
        left_number: args.left_num.clone(),
        right_number: args.right_num.clone(),
        ..PlateRequest::new(kind, size)
    }
}

fn glyphs_path(flag: Option<&str>) -> PathBuf {
    if let Some(path) = flag {
        return PathBuf::from(path);
    }
    match std::env::var_os(GLYPHS_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_GLYPHS),
    }
}

fn load_geometry(path: Option<&str>) -> Result<Option<GeometryTable>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)?;
    Ok(Some(GeometryTable::from_json_str(&text)?))
}

fn write_bytes(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        Some(path) => std::fs::write(path, bytes)?,
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let (kind, layout_only) = match args.command {
        Some(Command::Render(kind)) => (kind, false),
        Some(Command::Layout(kind)) => (kind, true),
        None => return Err(CliError::Usage(usage())),
    };

    // Reject incomplete input before touching the glyph asset.
    let request = build_request(kind, &args);
    request.validate()?;

    let geometry = load_geometry(args.geometry.as_deref())?;
    let store = load_glyphs(glyphs_path(args.glyphs.as_deref()))?;

    let mut renderer = PlateRenderer::new(&store);
    if let Some(geometry) = &geometry {
        renderer = renderer.with_geometry(geometry);
    }

    if layout_only {
        let layout = renderer.layout(&request)?;
        let mut json = if args.pretty {
            serde_json::to_string_pretty(&layout)?
        } else {
            serde_json::to_string(&layout)?
        };
        json.push('\n');
        return write_bytes(json.as_bytes(), args.out.as_deref());
    }

    let bytes = match args.render_format {
        RenderFormat::Svg => renderer.render_svg(&request)?.into_bytes(),
        RenderFormat::Pdf => renderer.render_pdf(&request)?,
        RenderFormat::Png => {
            let raster = RasterOptions {
                scale: args.render_scale,
                ..RasterOptions::default()
            };
            renderer.render_png(&request, &raster)?
        }
    };
    write_bytes(&bytes, args.out.as_deref())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
