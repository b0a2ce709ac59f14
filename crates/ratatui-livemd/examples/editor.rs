use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui_livemd::decoration::MarkupKind;
use ratatui_livemd::editor::EditorAction;
use ratatui_livemd::editor::LiveMarkdownEditor;
use ratatui_livemd::editor::LiveMarkdownEditorOptions;
use ratatui_livemd::options::DecorationOptions;
use ratatui_livemd_core::input::InputEvent;
use ratatui_livemd_core::input::KeyCode;
use ratatui_livemd_core::input::KeyEvent;
use ratatui_livemd_core::input::KeyModifiers;
use ratatui_livemd_core::theme::Theme;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

const SAMPLE_MARKDOWN: &str = r#"# Heading 1

This is **bold**, *italic*, `inline code`, ~~strike~~, and a [link](https://example.com).
A relative [guide](./guide.md) resolves against the base url.

## Try it

Type markup and watch it turn into styled text. Move the caret or click into a
decorated span: the raw markdown underneath stays editable.

- `Ctrl+O` or `Ctrl+click`: open the link under the caret
- `Esc` or `Ctrl+Q`: quit
"#;

fn main() -> io::Result<()> {
    init_tracing()?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor = LiveMarkdownEditor::with_options(LiveMarkdownEditorOptions {
        decorations: DecorationOptions::default().with_base_url("https://example.com/docs/"),
        ..LiveMarkdownEditorOptions::default()
    });
    editor.set_text(SAMPLE_MARKDOWN);

    let res = run(&mut terminal, &mut editor);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

/// Logs go to the file named by `LIVEMD_LOG`; the terminal belongs to the UI.
fn init_tracing() -> io::Result<()> {
    let Ok(path) = std::env::var("LIVEMD_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .init();
    Ok(())
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    editor: &mut LiveMarkdownEditor,
) -> io::Result<()> {
    let mut status = String::from("ready");
    loop {
        terminal.draw(|f| ui(f, editor, &status))?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Ok(event) = InputEvent::try_from(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(key) = &event {
            if is_quit(key) {
                return Ok(());
            }
        }

        match editor.input(event) {
            EditorAction::OpenLink(url) => status = format!("open {url}"),
            EditorAction::Submitted(text) => status = format!("submitted {} bytes", text.len()),
            EditorAction::Changed | EditorAction::Redraw | EditorAction::None => {}
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || key.matches(&KeyEvent::new(KeyCode::Char('q')).with_modifiers(KeyModifiers::CTRL))
}

fn ui(f: &mut Frame<'_>, editor: &mut LiveMarkdownEditor, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title("ratatui-livemd");
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);
    editor.render_ref(inner, f.buffer_mut());
    if let Some((x, y)) = editor.cursor_pos(inner) {
        f.set_cursor_position((x, y));
    }

    let decorations = editor.decorations();
    let links = decorations
        .set()
        .iter()
        .filter(|r| matches!(r.kind, MarkupKind::Link { .. }))
        .count();
    let theme = Theme::default();
    let line = Line::from(vec![
        Span::styled(
            format!(
                " gen {} | {} decorations | {} links | ",
                decorations.generation(),
                decorations.len(),
                links
            ),
            theme.text_muted,
        ),
        Span::styled(status.to_string(), theme.accent),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default()), chunks[1]);
}
