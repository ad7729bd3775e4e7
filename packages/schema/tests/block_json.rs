//! Wire-format tests for block documents

use potatopay_schema::{Block, BlockPart, BlockType, TipData};
use serde_json::json;

#[test]
fn test_parse_tip_block() {
    let value = json!({
        "type": "tip",
        "name": "tip-card-1",
        "template": "<p>{{ visitor_name }}</p>",
        "data": { "primary_color": "#FF0000", "display_time": 8 },
        "style": { "top": "10px", "left": "0px" },
        "className": "absolute"
    });

    let block: Block = serde_json::from_value(value).unwrap();

    assert_eq!(block.block_type(), BlockType::Tip);
    assert_eq!(block.name(), "tip-card-1");
    assert_eq!(block.class_name(), Some("absolute"));
    assert_eq!(block.style().get("top"), Some("10px"));

    let Block::Tip(tip) = &block else {
        panic!("Expected tip block");
    };
    assert_eq!(tip.data.primary_color, "#FF0000");
    assert_eq!(tip.data.display_time, 8);
    assert_eq!(tip.data.text_color, TipData::default().text_color);
}

#[test]
fn test_missing_data_and_style_are_filled() {
    let block: Block = serde_json::from_value(json!({
        "type": "qr_code",
        "name": "qr-code-1",
        "template": "<img />"
    }))
    .unwrap();

    assert!(block.style().is_empty());
    assert_eq!(block.data_value()["qr_code_color"], "#000000");
    assert_eq!(block.data_value()["background_color"], "#FFFFFF");
}

#[test]
fn test_parse_compound_tips_block() {
    let block: Block = serde_json::from_value(json!({
        "type": "tips",
        "name": "tips-1",
        "template": "",
        "data": {},
        "style": {},
        "tip_btn": {
            "template": "<button>{{ data.label }}</button>",
            "data": { "label": "Tip me" },
            "style": { "color": "red" },
            "className": "btn"
        },
        "tip_card": { "template": "<div>card</div>" }
    }))
    .unwrap();

    let button = block.part(BlockPart::TipButton).unwrap();
    assert_eq!(button.data["label"], "Tip me");
    assert_eq!(button.class_name.as_deref(), Some("btn"));

    let card = block.part(BlockPart::TipCard).unwrap();
    assert_eq!(card.template, "<div>card</div>");
    assert!(card.style.is_empty());
}

#[test]
fn test_parse_user_form_with_input_part() {
    let block: Block = serde_json::from_value(json!({
        "type": "user_form",
        "name": "user-form-1",
        "template": "<form></form>",
        "input": { "className": "rounded border", "style": { "padding": "4px" } }
    }))
    .unwrap();

    let input = block.part(BlockPart::Input).unwrap();
    assert_eq!(input.class_name.as_deref(), Some("rounded border"));
    assert_eq!(input.style.to_inline(), "padding: 4px");
}

#[test]
fn test_serialize_uses_wire_names() {
    let block = Block::new_default(BlockType::Razorpay)
        .with_class_name(BlockPart::Root, Some("mx-auto".to_string()))
        .unwrap();

    let value = serde_json::to_value(&block).unwrap();

    assert_eq!(value["type"], "razorpay");
    assert_eq!(value["name"], "razorpay-1");
    assert_eq!(value["className"], "mx-auto");
    assert_eq!(value["button"]["data"]["label"], "Pay with Razorpay");
    assert!(value.get("root").is_none());
}

#[test]
fn test_generic_block_keeps_arbitrary_data() {
    let value = json!({
        "type": "generic",
        "name": "custom",
        "template": "{{ data.headline }}",
        "data": { "headline": "Hello", "nested": { "a": [1, 2, 3] } },
        "style": {}
    });

    let block: Block = serde_json::from_value(value.clone()).unwrap();
    let back = serde_json::to_value(&block).unwrap();

    assert_eq!(back["data"], value["data"]);
}

#[test]
fn test_unknown_type_is_rejected() {
    let result: Result<Block, _> = serde_json::from_value(json!({
        "type": "banner",
        "name": "x",
        "template": ""
    }));
    assert!(result.is_err());
}

#[test]
fn test_unknown_block_level_keys_round_trip() {
    let value = json!({
        "_id": "665f1c2e",
        "updatedAt": "2024-06-01T10:00:00Z",
        "type": "tip",
        "name": "tip-card-1",
        "template": "<p>{{ visitor_name }}</p>",
        "data": { "primary_color": "#FF0000" },
        "style": {}
    });

    let block: Block = serde_json::from_value(value).unwrap();
    let written = serde_json::to_value(&block).unwrap();

    assert_eq!(written["_id"], "665f1c2e");
    assert_eq!(written["updatedAt"], "2024-06-01T10:00:00Z");
    assert_eq!(written["type"], "tip");
}

#[test]
fn test_compound_block_keeps_unknown_keys_at_every_level() {
    let value = json!({
        "_id": "razor-7",
        "type": "razorpay",
        "name": "razorpay-1",
        "template": "{{ button }}",
        "button": {
            "template": "<button>Pay</button>",
            "variant": "outline"
        }
    });

    let block: Block = serde_json::from_value(value).unwrap();
    let button = block.part(BlockPart::Button).unwrap();
    assert_eq!(button.template, "<button>Pay</button>");
    assert_eq!(button.extra["variant"], "outline");

    let written = serde_json::to_value(&block).unwrap();
    assert_eq!(written["_id"], "razor-7");
    assert_eq!(written["button"]["variant"], "outline");
    assert_eq!(written["template"], "{{ button }}");
    assert!(written.get("root").is_none());
}
