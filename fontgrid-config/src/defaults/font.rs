// Font defaults

pub fn font_size() -> f32 {
    13.0
}

pub fn font_family() -> Vec<String> {
    vec!["JetBrains Mono".to_string()]
}

pub fn bool_true() -> bool {
    true
}
