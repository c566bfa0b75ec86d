use std::process;

use zonemap::{
    draw_overlap_detail, draw_zones, overlap_report, DetailStyle, FidelityMode, OverlapOptions,
    Style, SvgCanvas, Viewport, ZoneSet,
};

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;
const DEFAULT_MARGIN: f64 = 50.0;

struct Args {
    zones_path: Option<String>,
    records: bool,
    width: f64,
    height: f64,
    margin: f64,
    options: OverlapOptions,
    pair: Option<(String, String)>,
    out: Option<String>,
}

fn print_usage() {
    println!("Usage: zonemap --zones FILE [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --zones FILE        Zone set JSON file (required)");
    println!("  --records           Treat FILE as rich records ([{{name, area}}, ...])");
    println!("  --width, -w N       Canvas width in pixels (default 800)");
    println!("  --height, -h N      Canvas height in pixels (default 600)");
    println!("  --resolution, -r WxH  Canvas size (e.g. 1920x1080)");
    println!("  --margin N          Canvas padding in pixels (default 50)");
    println!("  --mode MODE         Overlap fidelity: exact | bbox (default exact)");
    println!("  --epsilon N         Minimum overlap area (default 0.0001)");
    println!("  --pair A,B          Render the overlap detail for zones A and B");
    println!("  --out FILE          Write the SVG rendering to FILE");
    println!("  --help              Show this help");
}

/// Parse command line arguments
fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut args = Args {
        zones_path: None,
        records: false,
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        margin: DEFAULT_MARGIN,
        options: OverlapOptions::default(),
        pair: None,
        out: None,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--zones" => {
                if i + 1 < argv.len() {
                    args.zones_path = Some(argv[i + 1].clone());
                    i += 1;
                }
            },
            "--records" => args.records = true,
            "--width" | "-w" => {
                if i + 1 < argv.len() {
                    if let Ok(w) = argv[i + 1].parse::<f64>() {
                        args.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < argv.len() {
                    if let Ok(h) = argv[i + 1].parse::<f64>() {
                        args.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < argv.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = argv[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>())
                        {
                            args.width = w;
                            args.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--margin" => {
                if i + 1 < argv.len() {
                    if let Ok(m) = argv[i + 1].parse::<f64>() {
                        args.margin = m;
                    }
                    i += 1;
                }
            },
            "--mode" => {
                if i + 1 < argv.len() {
                    args.options.mode = match argv[i + 1].as_str() {
                        "bbox" => FidelityMode::BoundingBox,
                        _ => FidelityMode::Exact,
                    };
                    i += 1;
                }
            },
            "--epsilon" => {
                if i + 1 < argv.len() {
                    if let Ok(eps) = argv[i + 1].parse::<f64>() {
                        args.options.area_epsilon = eps;
                    }
                    i += 1;
                }
            },
            "--pair" => {
                if i + 1 < argv.len() {
                    let parts: Vec<&str> = argv[i + 1].splitn(2, ',').collect();
                    if parts.len() == 2 {
                        args.pair = Some((parts[0].to_string(), parts[1].to_string()));
                    }
                    i += 1;
                }
            },
            "--out" => {
                if i + 1 < argv.len() {
                    args.out = Some(argv[i + 1].clone());
                    i += 1;
                }
            },
            "--help" => {
                print_usage();
                process::exit(0);
            },
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(2);
            },
        }
        i += 1;
    }

    args
}

fn main() {
    let args = parse_args();

    let Some(path) = args.zones_path else {
        eprintln!("Missing required --zones FILE");
        print_usage();
        process::exit(2);
    };

    let set = if args.records {
        ZoneSet::load_records(&path)
    } else {
        ZoneSet::load(&path)
    };
    let set = match set {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Failed to load zones from {path}: {e}");
            process::exit(1);
        },
    };
    println!("Loaded {} zones from {path}", set.zones.len());

    let lines = match overlap_report(&set.zones, &args.options) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Overlap detection failed: {e}");
            process::exit(1);
        },
    };
    if lines.is_empty() {
        println!("No overlapping zones");
    } else {
        for line in &lines {
            println!("{line}");
        }
    }

    let viewport = Viewport::new(args.width, args.height, args.margin);
    let mut canvas = SvgCanvas::new(args.width, args.height);

    let drawn = if let Some((name_a, name_b)) = &args.pair {
        let (Some(zone_a), Some(zone_b)) = (set.zone(name_a), set.zone(name_b)) else {
            eprintln!("Unknown zone pair: {name_a}, {name_b}");
            process::exit(1);
        };
        draw_overlap_detail(
            &mut canvas,
            zone_a,
            zone_b,
            &viewport,
            &args.options,
            &DetailStyle::default(),
        )
    } else {
        draw_zones(&mut canvas, &set.zones, &viewport, &Style::stroke("blue"))
    };
    if let Err(e) = drawn {
        eprintln!("Render failed: {e}");
        process::exit(1);
    }

    if let Some(out) = &args.out {
        if let Err(e) = canvas.save(out) {
            eprintln!("Failed to write {out}: {e}");
            process::exit(1);
        }
        println!("Wrote {out}");
    }
}
