use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use gt_ascii::matcher::CharBrightnessIndex;
use gt_ascii::pipeline::RenderPipeline;
use gt_ascii::tiler::padded_size;
use gt_core::charset::{CharSet, PRINTABLE};
use gt_core::config::{OutputKind, RenderConfig};
use gt_core::raster::Raster;
use gt_core::traits::{AsciiOutput, GlyphSource};
use gt_export::{ConsoleOutput, HtmlOutput};
use gt_source::ImageSource;
use thiserror::Error;

const PROMPT: &str = ">>> ";

/// Messages d'erreur présentés à l'utilisateur du shell.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellError {
    #[error("Did not execute due to incorrect command.")]
    UnknownCommand,
    #[error("Did not add due to incorrect format.")]
    AddFormat,
    #[error("Did not remove due to incorrect format.")]
    RemoveFormat,
    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionBounds,
    #[error("Did not change resolution due to incorrect format.")]
    ResolutionFormat,
    #[error("Did not change output method due to incorrect format.")]
    OutputFormat,
    #[error("Did not execute. Charset is empty.")]
    EmptyCharset,
}

/// Sélection de caractères pour `add` / `remove`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    /// A single character.
    Single(char),
    /// Every printable ASCII character.
    All,
    /// The space character.
    Space,
    /// Inclusive range between two alphanumerics, endpoints in order.
    Range(char, char),
}

impl Selector {
    /// Parse `c`, `all`, `space` or `a-z` (endpoints may be reversed).
    #[must_use]
    pub fn parse(arg: &str) -> Option<Self> {
        let chars: Vec<char> = arg.chars().collect();
        match chars.as_slice() {
            [c] => Some(Self::Single(*c)),
            _ if arg == "all" => Some(Self::All),
            _ if arg == "space" => Some(Self::Space),
            [a, '-', b] if a.is_ascii_alphanumeric() && b.is_ascii_alphanumeric() => {
                Some(Self::Range(*a.min(b), *a.max(b)))
            }
            _ => None,
        }
    }

    /// Characters covered by the selection.
    #[must_use]
    pub fn chars(self) -> Vec<char> {
        match self {
            Self::Single(c) => vec![c],
            Self::All => PRINTABLE.collect(),
            Self::Space => vec![' '],
            Self::Range(a, b) => (a..=b).collect(),
        }
    }
}

/// Pas de changement de résolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResStep {
    Up,
    Down,
}

/// Commande du shell, une par ligne.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Chars,
    Add(Selector),
    Remove(Selector),
    Res(ResStep),
    Image(PathBuf),
    Output(OutputKind),
    AsciiArt,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    /// Returns the user-facing error for a malformed command.
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let line = line.trim_end_matches(['\r', '\n']);
        // Les commandes à argument exigent l'espace séparateur.
        let (head, arg) = match line.split_once(' ') {
            Some((head, arg)) => (head, Some(arg)),
            None => (line, None),
        };
        match (head, arg) {
            ("exit", None) => Ok(Self::Exit),
            ("chars", None) => Ok(Self::Chars),
            ("asciiArt", None) => Ok(Self::AsciiArt),
            ("add", Some(arg)) => Selector::parse(arg).map(Self::Add).ok_or(ShellError::AddFormat),
            ("remove", Some(arg)) => Selector::parse(arg)
                .map(Self::Remove)
                .ok_or(ShellError::RemoveFormat),
            ("res", arg) => match arg.map(str::trim) {
                Some("up") => Ok(Self::Res(ResStep::Up)),
                Some("down") => Ok(Self::Res(ResStep::Down)),
                _ => Err(ShellError::ResolutionFormat),
            },
            ("image", Some(arg)) => Ok(Self::Image(PathBuf::from(arg.trim()))),
            ("output", Some(arg)) => arg
                .trim()
                .parse::<OutputKind>()
                .map(Self::Output)
                .map_err(|_| ShellError::OutputFormat),
            _ => Err(ShellError::UnknownCommand),
        }
    }
}

/// Bornes de résolution pour une image `width × height` :
/// `[max(1, width / height), min(largeur, hauteur) après padding]`.
#[must_use]
pub fn resolution_bounds(width: u32, height: u32) -> (u32, u32) {
    let min = (width / height.max(1)).max(1);
    let (padded_w, padded_h) = padded_size(width, height);
    (min, padded_w.min(padded_h))
}

/// Double or halve `current` within `bounds`.
///
/// # Errors
/// [`ShellError::ResolutionBounds`] if the result would leave the bounds.
pub fn step_resolution(current: u32, step: ResStep, bounds: (u32, u32)) -> Result<u32, ShellError> {
    let (min, max) = bounds;
    let next = match step {
        ResStep::Up => current.checked_mul(2).filter(|&r| r <= max),
        ResStep::Down => Some(current / 2).filter(|&r| r >= min && r > 0),
    };
    next.ok_or(ShellError::ResolutionBounds)
}

/// Boucle interactive : état de session + index de luminosité long-vivant.
pub struct Shell<G: GlyphSource> {
    config: RenderConfig,
    charset: CharSet,
    index: CharBrightnessIndex<G>,
    resolution: u32,
    output: OutputKind,
    raster: Raster,
    image_name: String,
    pipeline: RenderPipeline,
}

impl<G: GlyphSource> Shell<G> {
    /// Start a session on `raster` with the charset, resolution and output
    /// of `config`.
    pub fn new(config: RenderConfig, glyphs: G, raster: Raster, image_name: String) -> Self {
        let charset = CharSet::from_chars(config.charset.chars());
        let index = CharBrightnessIndex::new(glyphs, charset.iter());
        Self {
            charset,
            index,
            resolution: config.resolution,
            output: config.output,
            raster,
            image_name,
            pipeline: RenderPipeline::from_config(&config),
            config,
        }
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// # Errors
    /// Returns an error only when `input` or `out` fail; command errors are
    /// reported on `out` and the loop continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}").context("Écriture du prompt impossible")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Lecture de l'entrée impossible")?;
            match Command::parse(&line) {
                Ok(Command::Exit) => break,
                Ok(command) => {
                    if let Err(e) = self.execute(command, &mut out) {
                        writeln!(out, "{e:#}")?;
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        Ok(())
    }

    /// Apply one command, writing any user-facing output to `out`.
    ///
    /// # Errors
    /// Returns the message to show the user when the command fails.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Exit => {}
            Command::Chars => writeln!(out, "{}", self.charset)?,
            Command::Add(selector) => {
                for ch in selector.chars() {
                    if self.charset.insert(ch) {
                        self.index.add(ch);
                    }
                }
                log::debug!("charset : {} caractères", self.charset.len());
            }
            Command::Remove(selector) => {
                if selector == Selector::All {
                    for ch in self.charset.as_slice().to_vec() {
                        self.index.remove(ch);
                    }
                    self.charset.clear();
                } else {
                    for ch in selector.chars() {
                        if self.charset.remove(ch) {
                            self.index.remove(ch);
                        }
                    }
                }
                log::debug!("charset : {} caractères", self.charset.len());
            }
            Command::Res(step) => {
                let bounds = resolution_bounds(self.raster.width(), self.raster.height());
                self.resolution = step_resolution(self.resolution, step, bounds)?;
                writeln!(out, "Resolution set to {}.", self.resolution)?;
            }
            Command::Image(path) => {
                let source = ImageSource::open(&path)
                    .context("Did not change image due to problem with image file.")?;
                self.image_name = source.name();
                self.raster = source.raster().clone();
                log::info!("Image : {}", self.image_name);
                writeln!(out, "Image changed successfully to {}", path.display())?;
            }
            Command::Output(kind) => {
                self.output = kind;
                writeln!(out, "Output method set to {}.", kind.as_str())?;
            }
            Command::AsciiArt => self.ascii_art(out)?,
        }
        Ok(())
    }

    fn ascii_art<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.charset.is_empty() {
            return Err(ShellError::EmptyCharset.into());
        }
        let grid = self
            .pipeline
            .render(&self.raster, &self.index, self.resolution)
            .context("Did not execute")?;
        match self.output {
            OutputKind::Console => ConsoleOutput::new(out).out(&grid)?,
            OutputKind::Html => {
                HtmlOutput::new(&self.config.html_path, self.config.html_font.as_str())
                    .out(&grid)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_ascii::glyphs::BuiltinGlyphs;
    use gt_core::raster::Pixel;

    fn checkerboard(size: u32) -> Raster {
        Raster::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Pixel::WHITE
            } else {
                Pixel::BLACK
            }
        })
        .unwrap()
    }

    fn shell(charset: &str, resolution: u32) -> Shell<BuiltinGlyphs> {
        let config = RenderConfig {
            charset: charset.to_string(),
            resolution,
            ..RenderConfig::default()
        };
        Shell::new(config, BuiltinGlyphs, checkerboard(8), "damier".into())
    }

    fn session(shell: &mut Shell<BuiltinGlyphs>, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_selectors() {
        assert_eq!(Selector::parse("x"), Some(Selector::Single('x')));
        assert_eq!(Selector::parse("all"), Some(Selector::All));
        assert_eq!(Selector::parse("space"), Some(Selector::Space));
        assert_eq!(Selector::parse("a-e"), Some(Selector::Range('a', 'e')));
        assert_eq!(Selector::parse("9-0"), Some(Selector::Range('0', '9')));
        assert_eq!(Selector::parse("!-~"), None);
        assert_eq!(Selector::parse("abc"), None);
        assert_eq!(Selector::parse(""), None);
    }

    #[test]
    fn selector_expansion() {
        assert_eq!(Selector::Range('a', 'd').chars(), vec!['a', 'b', 'c', 'd']);
        assert_eq!(Selector::All.chars().len(), 95);
        assert_eq!(Selector::Space.chars(), vec![' ']);
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("exit"), Ok(Command::Exit));
        assert_eq!(Command::parse("add a-c"), Ok(Command::Add(Selector::Range('a', 'c'))));
        assert_eq!(Command::parse("add "), Err(ShellError::AddFormat));
        assert_eq!(Command::parse("remove all"), Ok(Command::Remove(Selector::All)));
        assert_eq!(Command::parse("remove ab"), Err(ShellError::RemoveFormat));
        assert_eq!(Command::parse("res up"), Ok(Command::Res(ResStep::Up)));
        assert_eq!(Command::parse("res"), Err(ShellError::ResolutionFormat));
        assert_eq!(Command::parse("res sideways"), Err(ShellError::ResolutionFormat));
        assert_eq!(Command::parse("output html"), Ok(Command::Output(OutputKind::Html)));
        assert_eq!(Command::parse("output pdf"), Err(ShellError::OutputFormat));
        assert_eq!(
            Command::parse("image cat.jpeg"),
            Ok(Command::Image(PathBuf::from("cat.jpeg")))
        );
        assert_eq!(Command::parse("asciiArt\r\n"), Ok(Command::AsciiArt));
        assert_eq!(Command::parse("render"), Err(ShellError::UnknownCommand));
    }

    #[test]
    fn bare_argument_commands_are_unknown() {
        for line in ["add", "remove", "output", "image"] {
            assert_eq!(Command::parse(line), Err(ShellError::UnknownCommand), "{line}");
        }
        assert_eq!(Command::parse("output "), Err(ShellError::OutputFormat));
        assert_eq!(Command::parse("remove "), Err(ShellError::RemoveFormat));
        assert_eq!(Command::parse("exit now"), Err(ShellError::UnknownCommand));
    }

    #[test]
    fn bare_add_reports_incorrect_command() {
        let mut sh = shell("01", 2);
        let text = session(&mut sh, "add\n");
        assert!(text.contains("Did not execute due to incorrect command."), "{text}");
        assert_eq!(sh.charset.len(), 2);
    }

    #[test]
    fn literal_space_is_a_single_char() {
        assert_eq!(Command::parse("add  "), Ok(Command::Add(Selector::Single(' '))));
        assert_eq!(Command::parse("add   "), Err(ShellError::AddFormat));
        assert_eq!(Command::parse("add space"), Ok(Command::Add(Selector::Space)));
    }

    #[test]
    fn bounds_follow_image_shape() {
        assert_eq!(resolution_bounds(300, 200), (1, 256));
        assert_eq!(resolution_bounds(1024, 128), (8, 128));
        assert_eq!(resolution_bounds(64, 64), (1, 64));
    }

    #[test]
    fn stepping_respects_bounds() {
        assert_eq!(step_resolution(4, ResStep::Up, (1, 8)), Ok(8));
        assert_eq!(step_resolution(8, ResStep::Up, (1, 8)), Err(ShellError::ResolutionBounds));
        assert_eq!(step_resolution(8, ResStep::Down, (1, 8)), Ok(4));
        assert_eq!(step_resolution(2, ResStep::Down, (2, 8)), Err(ShellError::ResolutionBounds));
        assert_eq!(step_resolution(1, ResStep::Down, (1, 8)), Err(ShellError::ResolutionBounds));
    }

    #[test]
    fn chars_lists_in_insertion_order() {
        let mut sh = shell("ba", 2);
        let text = session(&mut sh, "add c\nadd a\nchars\nexit\n");
        assert!(text.contains("b a c\n"), "{text}");
    }

    #[test]
    fn add_and_remove_keep_index_in_sync() {
        let mut sh = shell("01", 2);
        session(&mut sh, "add a-c\nremove 0\nremove z\n");
        assert_eq!(sh.charset.as_slice(), &['1', 'a', 'b', 'c']);
        assert_eq!(sh.index.chars(), vec!['1', 'a', 'b', 'c']);

        session(&mut sh, "remove all\n");
        assert!(sh.charset.is_empty());
        assert!(sh.index.is_empty());
    }

    #[test]
    fn ascii_art_prints_grid() {
        let mut sh = shell(" #", 8);
        let text = session(&mut sh, "asciiArt\nexit\n");
        assert!(text.contains("# # # # \n # # # #\n"), "{text}");
    }

    #[test]
    fn empty_charset_refuses_to_render() {
        let mut sh = shell("", 2);
        let text = session(&mut sh, "asciiArt\n");
        assert!(text.contains("Did not execute. Charset is empty."), "{text}");
    }

    #[test]
    fn bad_resolution_reports_without_output() {
        let mut sh = shell(" #", 3);
        let text = session(&mut sh, "asciiArt\n");
        assert!(text.contains("Did not execute"), "{text}");
        assert!(!text.contains('#'), "{text}");
    }

    #[test]
    fn res_commands_update_state() {
        let mut sh = shell("01", 4);
        let text = session(&mut sh, "res up\nres up\nres down\n");
        assert!(text.contains("Resolution set to 8."));
        assert!(text.contains("Did not change resolution due to exceeding boundaries."));
        assert_eq!(sh.resolution, 4);
    }

    #[test]
    fn unknown_command_message() {
        let mut sh = shell("01", 2);
        let text = session(&mut sh, "dance\n");
        assert!(text.contains("Did not execute due to incorrect command."));
    }

    #[test]
    fn output_switch_and_html_export() {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("art.html");
        let config = RenderConfig {
            charset: " #".into(),
            resolution: 2,
            html_path: html_path.clone(),
            ..RenderConfig::default()
        };
        let mut sh = Shell::new(config, BuiltinGlyphs, checkerboard(2), "damier".into());
        let text = session(&mut sh, "output html\nasciiArt\n");
        assert!(text.contains("Output method set to html."));
        assert_eq!(sh.output, OutputKind::Html);
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("<pre>\n# \n #\n</pre>"), "{html}");
    }

    #[test]
    fn image_failure_keeps_previous_image() {
        let mut sh = shell("01", 2);
        let text = session(&mut sh, "image /nonexistent/nope.png\n");
        assert!(text.contains("Did not change image"), "{text}");
        assert_eq!(sh.image_name, "damier");
    }

    #[test]
    fn stops_at_end_of_input() {
        let mut sh = shell("01", 2);
        let text = session(&mut sh, "chars\n");
        assert_eq!(text.matches(PROMPT).count(), 2);
    }
}
