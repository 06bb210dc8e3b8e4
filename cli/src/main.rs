mod highlighter;
mod lexer;
mod terminal;

use bytepad::{render_failure, render_failure_to_string_no_color};
use bytepad_core::{
    CompileSession, DEFAULT_LANGUAGE, HttpTransport, SessionError, SessionOptions,
};
use clap::Parser;
use highlighter::SourceHighlighter;
use lexer::{BracketValidator, KEYWORDS};
use miette::{IntoDiagnostic, Result, WrapErr};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    FileBackedHistory, History, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::io::{Read, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::{TerminalPanels, TerminalSource};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/compile";
const HISTORY_SIZE: usize = 1000;

const HELP: &str = "\
Type a program and press Enter to compile it.

  Enter / Ctrl+Enter   compile (Enter keeps reading while brackets are open)
  Alt+Enter            insert a newline
  :help                show this message
  Ctrl+D / Ctrl+C      quit

Markers from the last failed attempt are cleared on the next one.";

/// Bytepad - compile programs with a remote bytecode compiler
#[derive(Parser, Debug)]
#[command(name = "bytepad")]
#[command(about = "Send programs to a compiler service and show result and bytecode", long_about = None)]
struct Args {
    /// Compiler service endpoint
    #[arg(long, env = "BYTEPAD_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Language tag sent with every request
    #[arg(long, env = "BYTEPAD_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Compile the contents of a file
    #[arg(long, short, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log session activity at debug level
    #[arg(long, short)]
    verbose: bool,

    /// Program to compile (if not provided, reads from stdin)
    expression: Option<String>,
}

type Session = CompileSession<HttpTransport, TerminalSource, TerminalPanels<Stdout>>;

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Use BYTEPAD_LOG or RUST_LOG environment variable to control log level
    // Default to WARN (DEBUG with --verbose) if neither is set
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("BYTEPAD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn add_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Enter, ReedlineEvent::Submit);
}

fn history() -> Option<Box<dyn History>> {
    let dir = dirs::data_local_dir()?.join("bytepad");
    if let Err(err) = std::fs::create_dir_all(&dir) {
        tracing::warn!(%err, "history disabled");
        return None;
    }
    match FileBackedHistory::with_file(HISTORY_SIZE, dir.join("history.txt")) {
        Ok(history) => Some(Box::new(history)),
        Err(err) => {
            tracing::warn!(%err, "history disabled");
            None
        }
    }
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let words: Vec<String> = KEYWORDS
        .iter()
        .map(|keyword| keyword.to_string())
        .chain([":help".to_string()])
        .collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&[':', '_']);
        completions.insert(words);
        completions
    });

    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_correct_cursor_pos(false);

    let mut keybindings = default_emacs_keybindings();
    add_keybindings(&mut keybindings);

    let mut line_editor = Reedline::create()
        .with_highlighter(Box::new(SourceHighlighter))
        .with_validator(Box::new(BracketValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(ide_menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));
    if let Some(history) = history() {
        line_editor = line_editor.with_history(history);
    }

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("bytepad".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

fn build_session(args: &Args, color: bool) -> Result<Session> {
    let transport = HttpTransport::new(&args.endpoint)?;
    tracing::debug!(endpoint = %transport.endpoint(), language = %args.language, "session ready");

    let options = SessionOptions {
        language: args.language.clone(),
        ..SessionOptions::default()
    };
    Ok(CompileSession::new(
        transport,
        TerminalSource::default(),
        TerminalPanels::new(std::io::stdout(), color),
        options,
    ))
}

/// Loads `source` into the session's view, compiles it and reports failures
/// to stderr. Returns whether the attempt succeeded.
async fn compile_and_report(session: &Session, name: &str, source: &str, color: bool) -> bool {
    session.view_mut().load(name, source);

    match session.compile_view().await {
        Ok(_) => true,
        Err(SessionError::Compile { message, .. }) => {
            let view = session.view();
            let markers = view.marks();
            if color {
                render_failure(view.name(), source, &message, &markers);
            } else {
                eprint!(
                    "{}",
                    render_failure_to_string_no_color(view.name(), source, &message, &markers)
                );
            }
            false
        }
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            false
        }
    }
}

async fn run_repl(session: &Session, color: bool) -> Result<()> {
    let (mut line_editor, prompt) = setup_reedline();

    println!("Bytepad REPL - Type a program to compile (:help for keys, Ctrl+D to exit)");

    loop {
        let sig = line_editor.read_line(&prompt).into_diagnostic()?;

        match sig {
            Signal::Success(buffer) => match buffer.trim() {
                "" => {}
                ":help" => println!("{HELP}"),
                _ => {
                    compile_and_report(session, "<repl>", &buffer, color).await;
                }
            },
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                return Ok(());
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let color = !args.no_color;
    let session = build_session(&args, color)?;

    let (name, source) = if let Some(expr) = &args.expression {
        ("<expression>".to_string(), expr.clone())
    } else if let Some(path) = &args.file {
        let source = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        (path.display().to_string(), source)
    } else if atty::is(atty::Stream::Stdin) {
        run_repl(&session, color).await?;
        return Ok(ExitCode::SUCCESS);
    } else {
        // Pipe mode: the whole input is one program
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .into_diagnostic()
            .wrap_err("failed to read program from stdin")?;
        ("<stdin>".to_string(), source)
    };

    if compile_and_report(&session, &name, &source, color).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
