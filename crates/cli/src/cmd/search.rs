//! Debounced search over stdin keystrokes
//!
//! Each stdin line is the current contents of the search field. Lines go
//! through the debouncer; only searches that survive the quiet period reach
//! the backend, and only responses newer than the displayed ones are shown.

use crate::render;
use crate::settings;
use anyhow::{Context, Result};
use debounce::Debouncer;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use search::{Applied, CatalogBackend, Dispatch, SearchAction, SearchSession};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Options for `lull search`
pub struct SearchArgs {
    pub catalog: PathBuf,
    pub delay_ms: Option<i64>,
    pub latency_ms: Option<u64>,
    pub limit: Option<usize>,
    pub replay: bool,
}

pub async fn run(config: Option<&Path>, args: SearchArgs) -> Result<()> {
    let path = settings::config_file_path(config)?;
    let mut settings = settings::load(&path)?;

    if let Some(delay_ms) = args.delay_ms {
        settings.debounce.delay_ms = delay_ms;
    }
    if let Some(latency_ms) = args.latency_ms {
        settings.search.latency_ms = latency_ms;
    }
    if let Some(limit) = args.limit {
        settings.search.limit = limit;
    }
    settings.validate().context("Invalid search options")?;

    let backend = CatalogBackend::load(&args.catalog)?
        .with_latency(Duration::from_millis(settings.search.latency_ms))
        .with_max_term_len(settings.search.max_term_len);

    let session = Arc::new(Mutex::new(SearchSession::new()));
    let action = SearchAction::new(Arc::new(backend), Arc::clone(&session), settings.search.limit);

    let (debouncer, mut dispatches) =
        Debouncer::with_outcomes(settings.debounce, move |term: String| {
            let action = action.clone();
            async move { action.run(term).await }
        })
        .context("Invalid debounce settings")?;

    info!("Searching {} (delay: {:?})", args.catalog.display(), debouncer.delay());

    let (mut keystrokes, reader) = spawn_reader(tokio::io::stdin(), args.replay);
    let mut spinner = Spinner::default();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            keystroke = keystrokes.recv() => match keystroke {
                Some(term) => debouncer.call(term),
                None => break,
            },
            Some(dispatch) = dispatches.recv() => {
                show(&session, dispatch);
                spinner.sync(session.lock().is_loading());
            }
            _ = ticker.tick() => spinner.sync(session.lock().is_loading()),
        }
    }

    // Input is over: only search the last term if all of it was read
    let input = reader.await.context("Input reader panicked")?;
    if input.is_ok() && debouncer.flush() {
        debug!("End of input, flushed pending search");
    }
    drop(debouncer);

    // The channel closes once every in-flight search has reported back
    while let Some(dispatch) = dispatches.recv().await {
        show(&session, dispatch);
    }
    spinner.sync(false);

    input
}

/// Apply a finished search to the session and print what changed
fn show(session: &Mutex<SearchSession>, dispatch: Option<Dispatch>) {
    // Blank terms produce no dispatch
    let Some(dispatch) = dispatch else {
        return;
    };

    let mut session = session.lock();
    match session.apply(dispatch) {
        Applied::Results => {
            let term = session.term().unwrap_or_default();
            render::print_results(term, session.results());
        }
        Applied::Failed => {
            if let Some(message) = session.error() {
                render::print_error(message);
            }
        }
        Applied::Stale => {}
    }
}

/// Read input lines into a channel, honoring replay offsets
fn spawn_reader<R>(input: R, replay: bool) -> (mpsc::Receiver<String>, JoinHandle<Result<()>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(64);

    let reader = tokio::spawn(async move {
        let start = Instant::now();
        let mut lines = BufReader::new(input).lines();
        let mut line_no = 0usize;

        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            line_no += 1;

            let term = if replay {
                let (offset, term) = parse_replay_line(&line)
                    .with_context(|| format!("Invalid replay line {}", line_no))?;
                tokio::time::sleep_until(start + offset).await;
                term
            } else {
                line
            };

            if tx.send(term).await.is_err() {
                break;
            }
        }

        Ok(())
    });

    (rx, reader)
}

/// Parse a `<offset_ms> <text>` replay line
///
/// The text may be empty, which models a cleared search field.
fn parse_replay_line(line: &str) -> Result<(Duration, String)> {
    let (offset, text) = match line.split_once(' ') {
        Some((offset, text)) => (offset, text),
        None => (line, ""),
    };

    let offset_ms: u64 = offset
        .trim()
        .parse()
        .with_context(|| format!("expected '<offset_ms> <text>', got '{}'", line))?;

    Ok((Duration::from_millis(offset_ms), text.to_string()))
}

/// Loading indicator on stderr
#[derive(Default)]
struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    fn sync(&mut self, loading: bool) {
        match (loading, self.bar.take()) {
            (true, None) => {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                    bar.set_style(style);
                }
                bar.set_message("Please wait while loading...");
                bar.enable_steady_tick(Duration::from_millis(100));
                self.bar = Some(bar);
            }
            (true, Some(bar)) => self.bar = Some(bar),
            (false, Some(bar)) => bar.finish_and_clear(),
            (false, None) => {}
        }
    }
}
