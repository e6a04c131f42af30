//! CLI tool for cleaning up ProPresenter song libraries.

mod prompt;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pro_core::{
    build_info_slide, has_info_slide, is_yes, Content, DecisionProvider, Document, EditorOptions,
    Reference, SlideDocumentEditor, Song,
};
use pro_library::{title_from_stem, JsonCodec, Library};
use pro_store::{SongStore, DEFAULT_DB_PATH};
use std::path::{Path, PathBuf};

use crate::prompt::{AcceptDefaults, TerminalDecisions};

/// Songbooks the library is organised by.
const VALID_BOOKS: [&str; 3] = ["DDS", "SOS", "FS4"];

/// Normalize the slides of ProPresenter presentations and add info slides.
#[derive(Parser, Debug)]
#[command(name = "pro-sweep")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder with the presentations to process
    input_library: PathBuf,

    /// Folder to write processed presentations to (created if missing)
    output_library: PathBuf,

    /// Songbook code (DDS, SOS or FS4). Without it every presentation is
    /// processed as a reference named after its file
    #[arg(short, long)]
    book: Option<String>,

    /// Process a single song number
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    song: Option<u32>,

    /// First song number
    #[arg(long, default_value = "1")]
    start: u32,

    /// Last song number (default: highest number in the library)
    #[arg(long)]
    end: Option<u32>,

    /// Song metadata database
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Prepend an info slide with reference, title, and details
    #[arg(long)]
    add_infoslide: bool,

    /// Keep single-line slides without asking
    #[arg(long)]
    no_single_line_check: bool,

    /// Do not mark the last slide with a dash
    #[arg(long)]
    no_end_marker: bool,

    /// Do not ask; accept the default answer to every question
    #[arg(short, long)]
    yes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Running counts for the final summary.
#[derive(Debug, Default)]
struct Summary {
    updated: usize,
    skipped: usize,
    failed: usize,
}

/// Everything a batch needs to process one presentation after another.
struct Session {
    input: Library,
    output: Library,
    codec: JsonCodec,
    options: EditorOptions,
    add_info_slide: bool,
    interactive: bool,
    decisions: Box<dyn DecisionProvider>,
    summary: Summary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let input = Library::open(&args.input_library)
        .with_context(|| format!("Input library not found: {}", args.input_library.display()))?;
    if is_same_folder(&args.input_library, &args.output_library) {
        bail!("Output library must differ from the input library");
    }
    let output = Library::create(&args.output_library).with_context(|| {
        format!(
            "Failed to create output library: {}",
            args.output_library.display()
        )
    })?;
    log::info!("Output library: {}", output.root().display());

    let decisions: Box<dyn DecisionProvider> = if args.yes {
        Box::new(AcceptDefaults)
    } else {
        Box::new(TerminalDecisions::stdio())
    };

    let mut session = Session {
        input,
        output,
        codec: JsonCodec::new(),
        options: EditorOptions {
            check_single_lines: !args.no_single_line_check,
            mark_end: !args.no_end_marker,
        },
        add_info_slide: args.add_infoslide,
        interactive: !args.yes,
        decisions,
        summary: Summary::default(),
    };

    match &args.book {
        Some(book) => {
            let book = book.to_uppercase();
            if !VALID_BOOKS.contains(&book.as_str()) {
                bail!("Unknown songbook: {} (expected one of {:?})", book, VALID_BOOKS);
            }
            let store = SongStore::open(&args.db)
                .with_context(|| format!("Failed to open database {}", args.db.display()))?;
            session.process_book(&book, &args, &store)?;
        }
        None => session.process_references()?,
    }

    let summary = &session.summary;
    println!(
        "Done: {} updated, {} skipped, {} failed",
        summary.updated, summary.skipped, summary.failed
    );
    Ok(())
}

impl Args {
    /// Inclusive song number range, given the library's highest number.
    fn number_range(&self, highest: Option<u32>) -> Option<(u32, u32)> {
        if let Some(song) = self.song {
            return Some((song, song));
        }
        let end = self.end.or(highest)?;
        Some((self.start, end))
    }
}

impl Session {
    fn process_book(&mut self, book: &str, args: &Args, store: &SongStore) -> Result<()> {
        let highest = self.input.highest_number(book)?;
        let Some((start, end)) = args.number_range(highest) else {
            log::warn!("No {} songs found in {}", book, self.input.root().display());
            return Ok(());
        };
        log::info!("Processing {} {:03} to {:03}", book, start, end);

        for number in start..=end {
            match self.process_song(book, number, store) {
                Ok(Some(path)) => {
                    self.summary.updated += 1;
                    println!("[*] {} {:03} updated\n    Path: {}", book, number, path.display());
                }
                Ok(None) => self.summary.skipped += 1,
                Err(e) => {
                    self.summary.failed += 1;
                    log::error!("{} {:03} - {:#}", book, number, e);
                }
            }
        }
        Ok(())
    }

    fn process_references(&mut self) -> Result<()> {
        let paths = self.input.presentations()?;
        log::info!("Processing {} presentations as references", paths.len());

        for path in paths {
            match self.process_reference(&path) {
                Ok(Some(out)) => {
                    self.summary.updated += 1;
                    println!("[*] {} updated", out.display());
                }
                Ok(None) => self.summary.skipped += 1,
                Err(e) => {
                    self.summary.failed += 1;
                    log::error!("{} - {:#}", path.display(), e);
                }
            }
        }
        Ok(())
    }

    /// Returns the written path, or `None` when the song was skipped.
    fn process_song(
        &mut self,
        book: &str,
        number: u32,
        store: &SongStore,
    ) -> Result<Option<PathBuf>> {
        let matches = self.input.find(book, number)?;
        let path = match matches.len() {
            0 => {
                log::warn!("{} {:03} - No presentation found", book, number);
                return Ok(None);
            }
            1 => matches[0].clone(),
            _ => self.choose_file(&matches)?,
        };

        let document = self.read(&path)?;
        if document.is_empty() {
            log::warn!("{} {:03} - Presentation has no slides, skipping", book, number);
            return Ok(None);
        }

        let song = match store.load_song(book, number)? {
            Some(song) => song,
            None => {
                let song = self.enter_song(book, number, &path);
                if self.interactive {
                    store.save_song(&song)?;
                }
                song
            }
        };

        self.finish(document, Content::Song(song)).map(Some)
    }

    fn process_reference(&mut self, path: &Path) -> Result<Option<PathBuf>> {
        let document = self.read(path)?;
        if document.is_empty() {
            log::warn!("{} - Presentation has no slides, skipping", path.display());
            return Ok(None);
        }
        let label = file_stem(path);
        self.finish(document, Content::Reference(Reference::new(label)))
            .map(Some)
    }

    fn read(&self, path: &Path) -> Result<Document> {
        self.input
            .read_document(&self.codec, path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Sweep, optionally add the info slide, and write the result.
    fn finish(&mut self, mut document: Document, content: Content) -> Result<PathBuf> {
        SlideDocumentEditor::new(self.decisions.as_mut())
            .with_options(self.options)
            .sweep(&mut document, Some(&content))?;

        if self.add_info_slide {
            let mut add = true;
            if has_info_slide(&document) {
                let prompt = format!(
                    "{} already has an info slide - replace it? [y/N]",
                    content.label()
                );
                if is_yes(&self.decisions.decide(&prompt, &[])) {
                    document.remove(0);
                } else {
                    add = false;
                }
            }
            if add {
                let cue = build_info_slide(&content)?;
                SlideDocumentEditor::new(self.decisions.as_mut()).insert(&mut document, cue, 0)?;
            }
        }

        let path = self
            .output
            .write_document(&self.codec, &content, document)
            .context("Failed to write presentation")?;
        log::debug!("{}", content);
        Ok(path)
    }

    fn choose_file(&mut self, matches: &[PathBuf]) -> Result<PathBuf> {
        let names: Vec<String> = matches.iter().map(|p| file_name(p)).collect();
        let answer = self
            .decisions
            .decide("Several presentations match, choose one:", &names);
        names
            .iter()
            .position(|name| *name == answer)
            .map(|i| matches[i].clone())
            .with_context(|| format!("Invalid choice: {:?}", answer))
    }

    /// Ask for the metadata the store does not have.
    fn enter_song(&mut self, book: &str, number: u32, path: &Path) -> Song {
        let default_title = title_from_stem(&file_stem(path));
        if !self.interactive {
            log::warn!(
                "{} {:03} - No metadata in database, using title \"{}\"",
                book,
                number,
                default_title
            );
            return Song::new(book, number, default_title, Vec::new());
        }

        log::warn!("{} {:03} - No metadata in database, enter it manually", book, number);
        let prompt = format!("Song title (default: \"{}\"):", default_title);
        let title = self.decisions.decide(&prompt, &[]).trim().to_string();
        let title = if title.is_empty() { default_title } else { title };

        let mut info = Vec::new();
        loop {
            let prompt = format!("Info line {} (empty to stop):", info.len() + 1);
            let line = self.decisions.decide(&prompt, &[]).trim().to_string();
            if line.is_empty() {
                break;
            }
            info.push(line);
        }

        Song::new(book, number, title, info)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_same_folder(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pro_core::document::{Slide, SlideElement, TextElement};
    use pro_core::{
        Action, Cue, FormattedLine, PresentationFile, RichTextComposer, ScriptedDecisions,
        SlideAction, INFO_SLIDE_LABEL,
    };
    use pro_library::DocumentCodec;
    use std::fs;
    use tempfile::TempDir;

    fn slide_cue(lines: &[&str]) -> Cue {
        let lines: Vec<FormattedLine> = lines.iter().map(|l| FormattedLine::plain(*l)).collect();
        let text = TextElement {
            rtf_data: RichTextComposer::body(180).compose(&lines),
            ..Default::default()
        };
        Cue::new(vec![Action::Slide(SlideAction {
            slide: Slide {
                elements: vec![SlideElement {
                    text: Some(text),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        })])
    }

    fn write_input(dir: &Path, name: &str, cues: Vec<Cue>) {
        let mut document = Document::from_file(PresentationFile::default()).unwrap();
        for (i, cue) in cues.into_iter().enumerate() {
            document.insert(cue, i).unwrap();
        }
        let bytes = JsonCodec::new().encode(&document.into_file()).unwrap();
        fs::write(dir.join(name), bytes).unwrap();
    }

    fn session(dir: &TempDir, answers: &[&str], interactive: bool) -> Session {
        let input_root = dir.path().join("in");
        fs::create_dir_all(&input_root).unwrap();
        Session {
            input: Library::open(&input_root).unwrap(),
            output: Library::create(dir.path().join("out")).unwrap(),
            codec: JsonCodec::new(),
            options: EditorOptions::default(),
            add_info_slide: true,
            interactive,
            decisions: Box::new(ScriptedDecisions::new(answers.iter().copied())),
            summary: Summary::default(),
        }
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pro-sweep", "in", "out"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_number_range() {
        assert_eq!(args(&["--song", "7"]).number_range(Some(100)), Some((7, 7)));
        assert_eq!(args(&[]).number_range(Some(100)), Some((1, 100)));
        assert_eq!(args(&["--start", "5", "--end", "9"]).number_range(None), Some((5, 9)));
        assert_eq!(args(&[]).number_range(None), None);
    }

    #[test]
    fn test_process_song_with_manual_entry() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &["", "Tekst: Ingemann", ""], true);
        write_input(
            session.input.root(),
            "DDS 007 - Syvende.pro",
            vec![slide_cue(&["Linje et", "Linje to"])],
        );
        let store = SongStore::open_in_memory().unwrap();

        let path = session.process_song("DDS", 7, &store).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "DDS 007 - Syvende.pro");

        let saved = store.load_song("DDS", 7).unwrap().unwrap();
        assert_eq!(saved.title, "Syvende");
        assert_eq!(saved.info, vec!["Tekst: Ingemann"]);

        let document = session.output.read_document(&session.codec, &path).unwrap();
        assert_eq!(document.len(), 2);
        assert!(has_info_slide(&document));
        assert_eq!(document.name, "DDS 007 - Syvende");
    }

    #[test]
    fn test_missing_song_skipped() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[], true);
        let store = SongStore::open_in_memory().unwrap();
        assert!(session.process_song("DDS", 1, &store).unwrap().is_none());
    }

    #[test]
    fn test_info_slide_not_duplicated() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &["y"], true);
        let content = Content::Song(Song::new("SOS", 3, "Tre", vec![]));
        let info = build_info_slide(&content).unwrap();
        write_input(
            session.input.root(),
            "SOS 003 - Tre.pro",
            vec![info, slide_cue(&["En", "To"])],
        );
        let store = SongStore::open_in_memory().unwrap();
        store.save_song(&Song::new("SOS", 3, "Tre", vec![])).unwrap();

        let path = session.process_song("SOS", 3, &store).unwrap().unwrap();
        let document = session.output.read_document(&session.codec, &path).unwrap();
        assert_eq!(document.len(), 2);
        let first = document.cues().next().and_then(Cue::first_slide).unwrap();
        assert_eq!(first.label, INFO_SLIDE_LABEL);
    }

    #[test]
    fn test_process_reference() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[], false);
        session.add_info_slide = false;
        write_input(
            session.input.root(),
            "Rom 10, 1-8.pro",
            vec![slide_cue(&["Første vers", "Andet vers"])],
        );

        session.process_references().unwrap();
        assert_eq!(session.summary.updated, 1);
        assert!(session.output.root().join("Rom 10, 1-8.pro").is_file());
    }

    #[test]
    fn test_unreadable_document_counted_as_failed() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[], false);
        fs::write(session.input.root().join("Broken.pro"), b"not json").unwrap();

        session.process_references().unwrap();
        assert_eq!(session.summary.failed, 1);
        assert_eq!(session.summary.updated, 0);
    }
}
