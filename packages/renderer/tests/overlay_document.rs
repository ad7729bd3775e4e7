// Overlay documents built from wire-format JSON, the way the dashboard stores them

use potatopay_renderer::{render_overlay, BlockRenderer, OverlayOptions, RenderContext};
use potatopay_schema::{Block, CreatorProfile};
use serde_json::json;

fn creator() -> CreatorProfile {
    CreatorProfile {
        username: "mashmaster".to_string(),
        display_name: "Mash Master".to_string(),
        ..Default::default()
    }
}

fn blocks_from_json(value: serde_json::Value) -> Vec<Block> {
    serde_json::from_value(value).expect("Failed to parse blocks")
}

#[test]
fn test_stored_overlay_renders_in_order() {
    let blocks = blocks_from_json(json!([
        {
            "type": "tip",
            "name": "tip-card-1",
            "template": "<p>{{ visitor_name }} sent {{ amount }} {{ currency }}</p>",
            "data": { "primary_color": "#FF0000" },
            "style": { "top": "10px" },
            "className": "absolute"
        },
        {
            "type": "qr_code",
            "name": "qr-code-1",
            "template": "<img data-color=\"{{ data.qr_code_color }}\" />",
            "data": {}
        }
    ]));

    let context = RenderContext::new(creator())
        .with_visitor("Bob", None)
        .with_transaction(2_500, "USD", "gg");

    let renderer = BlockRenderer::new().unwrap();
    let html = render_overlay(&renderer, &blocks, &context, &OverlayOptions::default());

    assert!(html.contains(
        "<div data-key=\"tip\"><div class=\"absolute\" style=\"top: 10px\"><p>Bob sent 2500 USD</p></div></div>"
    ));
    assert!(html.contains("<div data-key=\"qr_code\"><div><img data-color=\"#000000\" /></div></div>"));
    assert!(html.find("data-key=\"tip\"").unwrap() < html.find("data-key=\"qr_code\"").unwrap());
}

#[test]
fn test_custom_title_and_framework() {
    let options = OverlayOptions {
        title: "Mash <Live>".to_string(),
        framework_src: String::new(),
        ..Default::default()
    };

    let renderer = BlockRenderer::new().unwrap();
    let html = render_overlay(&renderer, &[], &RenderContext::new(creator()), &options);

    assert!(html.contains("<title>Mash &lt;Live&gt;</title>"));
    assert!(!html.contains("<script"));
}

#[test]
fn test_undefined_variable_is_isolated_to_its_block() {
    let blocks = blocks_from_json(json!([
        { "type": "generic", "template": "{{ nope.missing }}" },
        { "type": "generic", "template": "<b>{{ username }}</b>" }
    ]));

    let renderer = BlockRenderer::new().unwrap();
    let html = render_overlay(
        &renderer,
        &blocks,
        &RenderContext::new(creator()),
        &OverlayOptions::default(),
    );

    assert_eq!(html.matches("block-error").count(), 1);
    assert!(html.contains("<b>mashmaster</b>"));
}
