mod application;
mod color;
mod error;
mod render;
mod source;

use std::ffi::OsString;

use clap::App;
use clap::Arg;
use clap::ArgMatches;

use error::PResult;
use error::PhantomError;


const VERSION: &'static str = env!("CARGO_PKG_VERSION");
const AUTHORS: &'static str = env!("CARGO_PKG_AUTHORS");


fn build_app() -> App<'static, 'static> {
    App::new("phantom-image")
        .version(VERSION)
        .author(AUTHORS)
        .about("Creates a 'phantom' transparent image from two input images")
        .arg(
            Arg::with_name("image1")
            .help("path to the first image (visible on background 1)")
            .required(true)
            .index(1)
        )
        .arg(
            Arg::with_name("image2")
            .help("path to the second image (visible on background 2)")
            .required(true)
            .index(2)
        )
        .arg(
            Arg::with_name("output")
            .short("o")
            .long("output")
            .help("the output file name, format follows the extension")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value(application::DEFAULT_OUTPUT)
        )
        .arg(
            Arg::with_name("color1")
            .long("color1")
            .alias("c1")
            .help("the first background color, \"#RRGGBB\" or \"#RGB\"; also `-c1`")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value("#000000")
        )
        .arg(
            Arg::with_name("color2")
            .long("color2")
            .alias("c2")
            .help("the second background color, \"#RRGGBB\" or \"#RGB\"; also `-c2`")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value("#FFFFFF")
        )
        .arg(
            Arg::with_name("size")
            .short("s")
            .long("size")
            .help("the maximum size (pixels) for the longest edge of each image")
            .takes_value(true)
            .default_value("320")
        )
        .arg(
            Arg::with_name("filter")
            .long("filter")
            .help("filter used in scale, can be \"nearest\", \"triangle\", \"gaussian\", \"catmullrom\", \"lanczos3\"")
            .takes_value(true)
            .default_value("catmullrom")
        )
        .arg(
            Arg::with_name("thread")
            .short("t")
            .long("thread")
            .help("multi-thread: thread number used while compositing")
            .takes_value(true)
            .default_value("1")
        )
        .arg(
            Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .help("more log output, repeat for trace")
        )
}

/// Options whose value is the next argument when written alone.
const VALUE_OPTIONS: &[&str] = &[
    "-o", "--output", "-c1", "-c2", "--color1", "--color2", "--c1", "--c2",
    "-s", "--size", "--filter", "-t", "--thread",
];

/// `-c1`/`-c2` are not valid clap short flags; rewrite them to the long form.
/// Values of other options and everything after `--` are left alone.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut out = Vec::new();
    let mut is_value = false;
    let mut escaped = false;
    for arg in args {
        if is_value || escaped {
            is_value = false;
            out.push(arg);
            continue;
        }
        let s = match arg.to_str() {
            Some(s) => s.to_string(),
            None => {
                out.push(arg);
                continue;
            }
        };
        if s == "--" {
            escaped = true;
            out.push(arg);
            continue;
        }
        is_value = VALUE_OPTIONS.contains(&s.as_str());
        let rewritten = rewrite_color_flag(&s);
        out.push(rewritten.map(OsString::from).unwrap_or(arg));
    }
    out
}

fn rewrite_color_flag(s: &str) -> Option<String> {
    for (short, long) in &[("-c1", "--color1"), ("-c2", "--color2")] {
        if s == *short {
            return Some(long.to_string());
        }
        let rest = match s.strip_prefix(short) {
            Some(rest) => rest,
            None => continue,
        };
        if let Some(value) = rest.strip_prefix('=') {
            return Some(format!("{}={}", long, value));
        }
        if rest.starts_with('#') {
            return Some(format!("{}={}", long, rest));
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &ArgMatches, name: &'static str) -> PResult<T> {
    let value = args.value_of(name).unwrap_or_default();
    value.parse().map_err(|_| PhantomError::InvalidArgument { name, value: value.to_string() })
}

fn build_options(args: &ArgMatches) -> PResult<application::AppOptions> {
    let mut options = application::AppOptions::default();

    let color1 = color::parse_hex_color(args.value_of("color1").unwrap_or("#000000"))?;
    let color2 = color::parse_hex_color(args.value_of("color2").unwrap_or("#FFFFFF"))?;
    options.render_option_mut().set_colors(color1, color2);

    options.render_option_mut().set_thread_num(parse_number(args, "thread")?)?;

    options.set_size(parse_number(args, "size")?)?;
    options.set_filter(args.value_of("filter").unwrap_or("catmullrom"))?;
    options.set_inputs(
        args.value_of_os("image1").unwrap_or_default(),
        args.value_of_os("image2").unwrap_or_default(),
    );
    if let Some(output) = args.value_of_os("output") {
        options.set_output(output);
    }
    Ok(options)
}

fn init_logger(verbose: u64) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!("warn,phantom_image={}", level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let matches = build_app().get_matches_from(normalize_args(std::env::args_os()));
    init_logger(matches.occurrences_of("verbose"));

    let result = build_options(&matches).and_then(|options| {
        let app = application::Application::new(options);
        app.run()?;
        Ok(app)
    });
    match result {
        Ok(app) => {
            println!("\nSuccess! Image saved to: {}", app.output().display());
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}


#[cfg(test)]
mod test {

    use std::ffi::OsString;

    use super::build_app;
    use super::build_options;
    use super::normalize_args;
    use crate::error::PhantomError;

    fn matches(args: &[&str]) -> clap::ArgMatches<'static> {
        let args: Vec<OsString> = args.iter().map(OsString::from).collect();
        build_app().get_matches_from_safe(normalize_args(args)).unwrap()
    }

    #[test]
    fn test_normalize() {
        let args: Vec<OsString> = ["prog", "-c1", "#FFF", "-c2=#000", "-o", "x.png", "-c10"]
            .iter().map(OsString::from).collect();
        let out: Vec<String> = normalize_args(args).into_iter().map(|s| s.into_string().unwrap()).collect();
        assert_eq!(out, vec!["prog", "--color1", "#FFF", "--color2=#000", "-o", "x.png", "-c10"]);
    }

    #[test]
    fn test_normalize_attached_value() {
        let args: Vec<OsString> = ["prog", "-c1#FFF", "-c2#00ff00"].iter().map(OsString::from).collect();
        let out: Vec<String> = normalize_args(args).into_iter().map(|s| s.into_string().unwrap()).collect();
        assert_eq!(out, vec!["prog", "--color1=#FFF", "--color2=#00ff00"]);
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let args: Vec<OsString> = ["prog", "-o", "-c1", "-c1", "-c2", "--", "-c2"]
            .iter().map(OsString::from).collect();
        let out: Vec<String> = normalize_args(args).into_iter().map(|s| s.into_string().unwrap()).collect();
        assert_eq!(out, vec!["prog", "-o", "-c1", "--color1", "-c2", "--", "-c2"]);
    }

    #[test]
    fn test_output_named_like_color_flag() {
        let m = matches(&["prog", "a.png", "b.png", "-o", "-c1", "-c1#00F"]);
        assert_eq!(m.value_of("output"), Some("-c1"));
        assert_eq!(m.value_of("color1"), Some("#00F"));
    }

    #[test]
    fn test_defaults() {
        let m = matches(&["prog", "a.png", "b.png"]);
        let options = build_options(&m).unwrap();
        assert_eq!(options.output(), std::path::Path::new("result.png"));
    }

    #[test]
    fn test_short_color_flags() {
        let m = matches(&["prog", "a.png", "b.png", "-c1", "#f00", "-c2", "#0000FF", "-s", "64", "-o", "o.png"]);
        assert_eq!(m.value_of("color1"), Some("#f00"));
        assert_eq!(m.value_of("color2"), Some("#0000FF"));
        assert!(build_options(&m).is_ok());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let m = matches(&["prog", "a.png", "b.png", "-c1", "notacolor"]);
        match build_options(&m) {
            Err(PhantomError::InvalidColor(s)) => assert_eq!(s, "notacolor"),
            _ => panic!("expected InvalidColor"),
        }
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        for args in &[
            vec!["prog", "a.png", "b.png", "-s", "0"],
            vec!["prog", "a.png", "b.png", "-s", "big"],
            vec!["prog", "a.png", "b.png", "-t", "0"],
            vec!["prog", "a.png", "b.png", "-t", "17"],
            vec!["prog", "a.png", "b.png", "--filter", "cubic"],
        ] {
            match build_options(&matches(args)) {
                Err(PhantomError::InvalidArgument { .. }) => { },
                _ => panic!("{:?} should be rejected", args),
            }
        }
    }
}
