/// Folder name a game uses for a language code. Unknown codes are used as is.
pub fn folder_name(code: &str) -> &str {
    match code {
        "en" => "english",
        "es" => "spanish",
        "fr" => "french",
        "de" => "german",
        "ru" => "russian",
        "pl" => "polish",
        "pt" => "braz_por",
        "zh" => "simp_chinese",
        "ja" => "japanese",
        "ko" => "korean",
        "tr" => "turkish",
        other => other,
    }
}
