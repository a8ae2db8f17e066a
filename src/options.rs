use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use torlife::{Config, Coord, FillMode, Pattern, Stamp, config};
use tracing_subscriber::filter::LevelFilter;

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run interactively in the terminal");
        opts.optflag("t", "threads", "compute generations on all cores");
        opts.optflag("", "print", "print the final grid (headless only)");
        opts.optopt("r", "rows", "number of grid rows (default 50)", "ROWS");
        opts.optopt("w", "cols", "number of grid columns (default 50)", "COLS");
        opts.optopt("f", "fill", "initial fill: random or empty", "TYPE");
        opts.optopt(
            "d",
            "density",
            "probability of a cell starting alive (default 0.167)",
            "P",
        );
        opts.optopt("", "seed", "seed for the random fill", "SEED");
        opts.optmulti(
            "p",
            "stamp",
            "stamp glider or pentadecathlon, at the center or ROW,COL",
            "NAME[@ROW,COL]",
        );
        opts.optopt("i", "input", "stamp a run-length-encoded pattern", "FILE");
        opts.optopt("", "origin", "where to stamp the input pattern", "ROW,COL");
        opts.optopt(
            "s",
            "delay",
            "the amount of time to wait between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt(
            "",
            "log-level",
            "off, error, warn, info, debug or trace",
            "LEVEL",
        );
        opts.optopt("", "log-file", "write logs to a file", "FILE");
        opts
    }

    /// Parses `args`, returning `None` after printing help
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let opts = Self::options();
        let usage = opts.usage("usage: torlife [options]");
        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .map_err(|err| anyhow!("{err}\n\n{usage}"))?;
        if matches.opt_present("help") {
            println!("{usage}");
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn opt<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.matches
            .opt_get::<T>(name)
            .map_err(|err| anyhow!("invalid --{name}: {err}"))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    pub fn print(&self) -> bool {
        self.matches.opt_present("print")
    }

    /// Delay between headless generations, only when asked for
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(self.opt::<u64>("delay")?.map(Duration::from_millis))
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        match self.opt::<LevelFilter>("log-level")? {
            Some(level) => Ok(level),
            // the console owns the screen, so only log there when sent to a file
            None if self.console() && self.log_file().is_none() => Ok(LevelFilter::OFF),
            None => Ok(LevelFilter::INFO),
        }
    }
    pub fn log_file(&self) -> Option<PathBuf> {
        self.matches.opt_str("log-file").map(PathBuf::from)
    }

    fn dimension(&self, name: &str, default: usize) -> Result<usize> {
        let value = self.opt::<usize>(name)?.unwrap_or(default);
        if value == 0 || i32::try_from(value).is_err() {
            bail!("--{name} must be between 1 and {}", i32::MAX);
        }
        Ok(value)
    }

    fn density(&self) -> Result<f64> {
        let density = self
            .opt::<f64>("density")?
            .unwrap_or(config::DEFAULT_DENSITY);
        if !(0.0..=1.0).contains(&density) {
            bail!("--density must be between 0 and 1, got {density}");
        }
        Ok(density)
    }

    fn fill_mode(&self) -> Result<FillMode> {
        match self.matches.opt_str("fill") {
            None => Ok(FillMode::default()),
            Some(mode) => FillMode::new(&mode)
                .ok_or_else(|| anyhow!("invalid --fill `{mode}`, expected random or empty")),
        }
    }

    fn origin(&self) -> Result<Option<Coord>> {
        let Some(origin) = self.matches.opt_str("origin") else {
            return Ok(None);
        };
        let parse = |s: Option<&str>| {
            s.and_then(|s| s.trim().parse::<i32>().ok())
                .ok_or_else(|| anyhow!("invalid --origin `{origin}`, expected ROW,COL"))
        };
        let mut parts = origin.splitn(2, ',');
        let row = parse(parts.next())?;
        let col = parse(parts.next())?;
        Ok(Some(Coord::new(row, col)))
    }

    fn stamps(&self) -> Result<Vec<Stamp>> {
        let mut stamps = self
            .matches
            .opt_strs("stamp")
            .iter()
            .map(|s| s.parse::<Stamp>().with_context(|| format!("invalid --stamp `{s}`")))
            .collect::<Result<Vec<_>>>()?;

        if let Some(file_name) = self.matches.opt_str("input") {
            let encoded = std::fs::read_to_string(&file_name)
                .with_context(|| format!("failed to read pattern file {file_name}"))?;
            let pattern = Pattern::from_rle(&encoded)
                .with_context(|| format!("failed to decode pattern file {file_name}"))?;
            stamps.push(Stamp {
                pattern,
                origin: self.origin()?,
            });
        } else if self.matches.opt_present("origin") {
            bail!("--origin only applies to --input");
        }
        Ok(stamps)
    }

    pub fn config(&self) -> Result<Config> {
        let delay = self.sleep()?.unwrap_or(config::DEFAULT_DELAY);
        if delay.is_zero() {
            bail!("--delay must be at least 1 millisecond");
        }
        let generations = match self.opt::<u64>("gens")? {
            Some(n) => Some(n),
            None if self.console() => None,
            None => Some(config::DEFAULT_HEADLESS_GENERATIONS),
        };

        Ok(Config {
            rows: self.dimension("rows", config::DEFAULT_ROWS)?,
            cols: self.dimension("cols", config::DEFAULT_COLS)?,
            fill: self.fill_mode()?,
            density: self.density()?,
            seed: self.opt::<u64>("seed")?,
            stamps: self.stamps()?,
            delay,
            generations,
            parallel: self.multithreading(),
            ..Config::default()
        })
    }
}
