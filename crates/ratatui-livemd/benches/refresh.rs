use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_livemd::editor::LiveMarkdownEditor;
use ratatui_livemd::refresh::Decorator;
use ratatui_livemd::window::TextWindow;
use ratatui_livemd_core::input::InputEvent;
use ratatui_livemd_core::input::KeyCode;
use ratatui_livemd_core::input::KeyEvent;

fn sample_markdown(paragraphs: usize) -> String {
    let mut s = String::new();
    for i in 0..paragraphs {
        s.push_str(&format!("## Section {i}\n\n"));
        s.push_str("This is **bold**, *italic*, `inline code`, ~~strike~~ and a ");
        s.push_str("[link](https://example.com). ");
        for _ in 0..4 {
            s.push_str("The quick brown fox jumps over the lazy dog. ");
        }
        s.push_str("\nStars 2 * 3 * 4 and an unclosed **bold run.\n\n");
    }
    s
}

fn bench_decorate_window(c: &mut Criterion) {
    let decorator = Decorator::default();
    let window = TextWindow::whole(sample_markdown(10));
    c.bench_function("decorate/window_40_lines", |b| {
        b.iter(|| {
            let out = decorator.decorate(black_box(&window)).unwrap();
            black_box(out.len());
        })
    });
}

fn bench_decorate_large_window(c: &mut Criterion) {
    let decorator = Decorator::default();
    let window = TextWindow::whole(sample_markdown(250));
    c.bench_function("decorate/window_1000_lines", |b| {
        b.iter(|| {
            let out = decorator.decorate(black_box(&window)).unwrap();
            black_box(out.len());
        })
    });
}

fn bench_editor_keystroke(c: &mut Criterion) {
    let area = Rect::new(0, 0, 100, 40);
    let mut editor = LiveMarkdownEditor::new();
    editor.set_text(sample_markdown(250));
    let mut buf = Buffer::empty(area);
    editor.render_ref(area, &mut buf);
    c.bench_function("editor/keystroke+render", |b| {
        b.iter(|| {
            editor.input(InputEvent::Key(KeyEvent::new(KeyCode::Char('x'))));
            editor.input(InputEvent::Key(KeyEvent::new(KeyCode::Backspace)));
            editor.render_ref(area, &mut buf);
            black_box(editor.decorations().len());
        })
    });
}

criterion_group!(
    benches,
    bench_decorate_window,
    bench_decorate_large_window,
    bench_editor_keystroke
);
criterion_main!(benches);
