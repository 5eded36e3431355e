//! Integration tests for streaming rendering.

use chatfmt::render::{collect_content, to_html, RenderEvent, RenderOptions, StreamingRenderer};
use chatfmt::{process, TableData};

fn answer() -> chatfmt::ProcessedContent {
    let tables = vec![TableData::new("Fees").with_headers(["Item", "Fee"]).with_row(["Card", "$5"])];
    process(
        "Intro paragraph\n[TABLE:Fees]\nMiddle\n---\nEnd ![pic](https://x.com/p.gif)",
        false,
        &tables,
    )
    .unwrap()
}

#[test]
fn test_stream_event_sequence() {
    let content = answer();
    let events: Vec<RenderEvent> = StreamingRenderer::new(&content, RenderOptions::default()).collect();

    assert_eq!(
        events.first(),
        Some(&RenderEvent::Start {
            block_count: 5,
            image_count: 1
        })
    );
    assert_eq!(events.last(), Some(&RenderEvent::End));

    let indices: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::Block { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert!(matches!(events[events.len() - 2], RenderEvent::Images(_)));
}

#[test]
fn test_stream_matches_full_render() {
    let content = answer();
    let options = RenderOptions::default().with_dark_mode(true);

    let streamed = collect_content(StreamingRenderer::new(&content, options.clone()));
    let full = to_html(&content, &options).unwrap();

    assert_eq!(format!("<div class=\"space-y-4\">\n{}\n</div>", streamed), full);
}

#[test]
fn test_stream_block_content() {
    let content = answer();
    let mut renderer = StreamingRenderer::new(&content, RenderOptions::default());
    assert_eq!(renderer.block_count(), 5);

    let _start = renderer.next();
    let first = renderer.next().unwrap();
    assert!(first.content().is_some_and(|html| html.contains("Intro paragraph")));

    let second = renderer.next().unwrap();
    assert!(second.content().is_some_and(|html| html.contains(">Fees</h3>")));
}

#[test]
fn test_stream_empty_answer() {
    let content = process("", false, &[]).unwrap();
    let events: Vec<RenderEvent> = StreamingRenderer::new(&content, RenderOptions::default()).collect();

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(RenderEvent::is_boundary));
}

#[test]
fn test_stream_is_fused_after_end() {
    let content = answer();
    let mut renderer = StreamingRenderer::new(&content, RenderOptions::default().with_images(false));
    let count = renderer.by_ref().count();

    assert_eq!(count, 7);
    assert!(renderer.is_done());
    assert!(renderer.next().is_none());
}
