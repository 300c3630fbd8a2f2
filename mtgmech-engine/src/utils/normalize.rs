//! 文本归一化工具
//! 统一大小写、换行与破折号，保证子串/正则匹配口径一致

/// 归一化规则文本：转小写、换行替换为空格、长破折号替换为连字符、去除首尾空白
///
/// 纯函数且幂等：`normalize(normalize(s)) == normalize(s)`
#[inline]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace('\n', " ")
        .replace('\u{2014}', "-")
        .trim()
        .to_string()
}

/// 标题化：每个以空白、连字符或斜杠分隔的单词首字母大写，其余字母小写
///
/// 撇号不视为单词边界（`can't` → `Can't`）
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_whitespace() || ch == '-' || ch == '/' {
            result.push(ch);
            at_word_start = true;
        } else if at_word_start {
            result.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            result.extend(ch.to_lowercase());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("  Flying\nVigilance  "), "flying vigilance");
        assert_eq!(normalize("Landfall — Whenever a land enters"), "landfall - whenever a land enters");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\n\n"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "   ",
            "Flying\nWhen Fog Giant enters, draw a card.",
            "Raid — When this creature enters, if you attacked this turn, draw a card.",
            "\n Ward {2}\n",
            "ÆTHER VIAL — İstanbul",
            "Chapter I — II\r\n",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("landfall"), "Landfall");
        assert_eq!(title_case("SPELL MASTERY"), "Spell Mastery");
        assert_eq!(title_case("will of the council"), "Will Of The Council");
        assert_eq!(title_case("half-dead/alive"), "Half-Dead/Alive");
        assert_eq!(title_case("can't block"), "Can't Block");
        assert_eq!(title_case(""), "");
    }
}
