// ==========================================
// DWG 后台 - RTF 文本清理
// ==========================================
// 有损清理，不解析 RTF 结构（字体/颜色/表格一律丢弃）
// 顺序: 控制字 → 花括号 → 换行 → 首尾空白
// ==========================================

use once_cell::sync::Lazy;
use regex::Regex;

// 反斜杠 + 字母 + 可选数字，如 \fs20、\f2、\par
static RE_CONTROL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[A-Za-z]+\d*").expect("Invalid regex"));
static RE_BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").expect("Invalid regex"));
static RE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("Invalid regex"));

/// RTF → 纯文本
///
/// 空输入返回空串，从不失败
pub fn rtf_to_plain(rtf: Option<&str>) -> String {
    let raw = match rtf {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };

    let text = RE_CONTROL_WORD.replace_all(raw, "");
    let text = RE_BRACES.replace_all(&text, "");
    let text = RE_NEWLINE.replace_all(&text, " ");
    text.trim().to_string()
}
