//! # Template presets
//!
//! Named starting templates per block type. The first preset of each type is
//! the canonical default used by [`Block::new_default`](crate::Block::new_default).
//!
//! Templates only reference keys the renderer always provides: the documented
//! top-level context keys, the typed `data` fields of the block, and the
//! sub-block defaults from [`part_data_defaults`].

use crate::data::DataMap;
use crate::{BlockPart, BlockType};
use serde_json::Value;

/// Template of one nested part of a compound preset
#[derive(Debug, Clone, Copy)]
pub struct PartPreset {
    pub part: BlockPart,
    pub template: &'static str,
}

/// A named template for a block type
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub template: &'static str,
    pub parts: &'static [PartPreset],
}

impl Preset {
    pub fn part(&self, part: BlockPart) -> Option<&PartPreset> {
        self.parts.iter().find(|p| p.part == part)
    }
}

const TIP_CARD_1: &str = r##"<div class="tip-alert rounded-xl p-4 shadow-lg" style="background-color: {{ data.primary_color }}; color: {{ data.text_color }};{% if data.background_image != "" %} background-image: url('{{ data.background_image }}'); background-size: cover;{% endif %}" data-display-time="{{ data.display_time }}">
  <p class="text-lg font-bold">{{ visitor_name | default: "Someone" }} tipped {{ currency }} {{ amount | divided_by: 100.0 | round: 2 }}</p>
  {% if message != "" %}<p class="mt-1" style="color: {{ data.message_text_color }};">{{ message }}</p>{% endif %}
</div>"##;

const TIP_CARD_2: &str = r##"<div class="tip-alert flex items-center gap-3 rounded-full px-5 py-3" style="background: linear-gradient(90deg, {{ data.primary_color }}, {{ data.secondary_color }}); color: {{ data.text_color }};" data-display-time="{{ data.display_time }}">
  <span class="text-2xl">🥔</span>
  <div>
    <p class="font-semibold">{{ visitor_name | default: "Someone" }} · {{ currency }} {{ amount | divided_by: 100.0 | round: 2 }}</p>
    {% if message != "" %}<p class="text-sm" style="color: {{ data.message_text_color }};">{{ message }}</p>{% endif %}
  </div>
</div>"##;

const QR_CODE_1: &str = r##"<div class="qr-code flex flex-col items-center rounded-lg p-3" style="background-color: {{ data.background_color }};">
  <img alt="Tip {{ username }}" width="180" height="180" src="https://api.qrserver.com/v1/create-qr-code/?size=180x180&data=https://potatopay.co/{{ username }}&color={{ data.qr_code_color | remove: '#' }}&bgcolor={{ data.background_color | remove: '#' }}" />
  <p class="mt-2 text-sm" style="color: {{ data.qr_code_color }};">potatopay.co/{{ username }}</p>
</div>"##;

const LEADERBOARD_1: &str = r##"<div class="leaderboard rounded-xl p-4" style="background-color: {{ data.primary_color }};{% if data.background_image != "" %} background-image: url('{{ data.background_image }}'); background-size: cover;{% endif %}">
  <h2 class="mb-2 text-xl font-bold" style="color: {{ data.heading_text_color }};">{{ data.title }}</h2>
  <ol class="space-y-1">
  {% for ranker in rankers %}
    <li class="leaderboard-row rank-{{ ranker.tier }} flex justify-between" style="color: {{ data.text_color }}; border-left: 4px solid {{ ranker.color }};">
      <span>{% if ranker.rank == 1 %}<span class="crown">👑</span> {% endif %}#{{ ranker.rank }} {{ ranker.name }}</span>
      <span>{{ ranker.currency }} {{ ranker.amount | divided_by: 100.0 | round: 2 }}</span>
    </li>
  {% endfor %}
  </ol>
</div>"##;

const SOCIALS_1: &str = r##"<ul class="socials flex flex-wrap gap-2">
{% for social in data.socials %}
  <li><a class="social-link social-{{ social.platform }}" href="{{ social.url }}" target="_blank" rel="noopener noreferrer">{{ social.platform | capitalize }}</a></li>
{% endfor %}
</ul>"##;

const RAZORPAY_1: &str = r##"<div class="razorpay-checkout flex justify-center">{{ button }}</div>"##;

const RAZORPAY_BUTTON_1: &str = r##"<button type="button" class="razorpay-button rounded px-4 py-2 font-semibold" data-username="{{ username }}">{{ data.label }}</button>"##;

const USER_FORM_1: &str = r##"<form class="user-form space-y-2">
{% for field in fields %}
  <label class="block">
    <span class="text-sm">{{ field.label }}</span>
    {% if field.kind == "textarea" %}<textarea name="{{ field.name }}" class="{{ input.class_name }}" style="{{ input.style }}"></textarea>{% else %}<input name="{{ field.name }}" type="{{ field.kind }}" class="{{ input.class_name }}" style="{{ input.style }}" />{% endif %}
  </label>
{% endfor %}
</form>"##;

const TIPS_1: &str = r##"<div class="tips flex flex-col items-center gap-3">{{ tip_card }}{{ tip_btn }}</div>"##;

const TIPS_CARD_1: &str = r##"<div class="tip-card rounded-lg p-4 text-center">
  {% if avatar_url != "" %}<img class="mx-auto h-16 w-16 rounded-full" src="{{ avatar_url }}" alt="{{ username }}" />{% endif %}
  <h3 class="text-lg font-bold">{{ display_name | default: username }}</h3>
  {% if bio != "" %}<p class="text-sm">{{ bio }}</p>{% endif %}
</div>"##;

const TIPS_BUTTON_1: &str = r##"<button type="button" class="tip-button rounded px-4 py-2 font-semibold">{{ data.label }}</button>"##;

const GENERIC_1: &str = r##"<div class="generic-block text-center">{{ display_name | default: username }}</div>"##;

const TIP_PRESETS: &[Preset] = &[
    Preset { name: "tip-card-1", template: TIP_CARD_1, parts: &[] },
    Preset { name: "tip-card-2", template: TIP_CARD_2, parts: &[] },
];

const QR_CODE_PRESETS: &[Preset] = &[Preset { name: "qr-code-1", template: QR_CODE_1, parts: &[] }];

const LEADERBOARD_PRESETS: &[Preset] = &[Preset {
    name: "leaderboard-1",
    template: LEADERBOARD_1,
    parts: &[],
}];

const SOCIALS_PRESETS: &[Preset] = &[Preset { name: "socials-1", template: SOCIALS_1, parts: &[] }];

const RAZORPAY_PRESETS: &[Preset] = &[Preset {
    name: "razorpay-1",
    template: RAZORPAY_1,
    parts: &[PartPreset { part: BlockPart::Button, template: RAZORPAY_BUTTON_1 }],
}];

const USER_FORM_PRESETS: &[Preset] = &[Preset {
    name: "user-form-1",
    template: USER_FORM_1,
    parts: &[PartPreset { part: BlockPart::Input, template: "" }],
}];

const TIPS_PRESETS: &[Preset] = &[Preset {
    name: "tips-1",
    template: TIPS_1,
    parts: &[
        PartPreset { part: BlockPart::TipCard, template: TIPS_CARD_1 },
        PartPreset { part: BlockPart::TipButton, template: TIPS_BUTTON_1 },
    ],
}];

const GENERIC_PRESETS: &[Preset] = &[Preset { name: "generic-1", template: GENERIC_1, parts: &[] }];

/// All presets of a block type (never empty)
pub fn for_type(block_type: BlockType) -> &'static [Preset] {
    match block_type {
        BlockType::Tip => TIP_PRESETS,
        BlockType::QrCode => QR_CODE_PRESETS,
        BlockType::Leaderboard => LEADERBOARD_PRESETS,
        BlockType::Socials => SOCIALS_PRESETS,
        BlockType::Razorpay => RAZORPAY_PRESETS,
        BlockType::UserForm => USER_FORM_PRESETS,
        BlockType::Tips => TIPS_PRESETS,
        BlockType::Generic => GENERIC_PRESETS,
    }
}

pub fn default_for(block_type: BlockType) -> &'static Preset {
    &for_type(block_type)[0]
}

pub fn find(block_type: BlockType, name: &str) -> Option<&'static Preset> {
    for_type(block_type).iter().find(|p| p.name == name)
}

/// Data every sub-block of `part` starts with.
///
/// The renderer layers a sub-block's own data over these so preset
/// templates can rely on the keys.
pub fn part_data_defaults(part: BlockPart) -> DataMap {
    let mut data = DataMap::new();
    match part {
        BlockPart::Button => {
            data.insert("label".to_string(), Value::from("Pay with Razorpay"));
        }
        BlockPart::TipButton => {
            data.insert("label".to_string(), Value::from("Send a tip"));
        }
        BlockPart::Root | BlockPart::Input | BlockPart::TipCard => {}
    }
    data
}
