//! 智利 RUT 的驗證、檢查碼計算與格式化。
//!
//! 所有函式對任何字串輸入都有定義，不會 panic 也不回傳錯誤。

use regex::Regex;
use std::sync::LazyLock;

static RUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,2}\.?[0-9]{3}\.?[0-9]{3}-?[0-9K]$").expect("static RUT pattern")
});

/// 加權 modulo-11，乘數由最低位開始 2..=7 循環
pub fn compute_check(digits: u32) -> char {
    let mut sum = 0u32;
    let mut multiplier = 2u32;

    for d in digits.to_string().bytes().rev() {
        sum += u32::from(d - b'0') * multiplier;
        multiplier = if multiplier == 7 { 2 } else { multiplier + 1 };
    }

    match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        n => char::from_digit(n, 10).unwrap_or('0'),
    }
}

/// 結構檢查後拆成 (本體, 檢查碼)，不比對檢查碼
pub(crate) fn parse(input: &str) -> Option<(u32, char)> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if !RUT_PATTERN.is_match(&cleaned) {
        return None;
    }

    let compact: String = cleaned.chars().filter(|c| *c != '.' && *c != '-').collect();
    let check = compact.chars().last()?;
    let body = &compact[..compact.len() - check.len_utf8()];

    Some((body.parse().ok()?, check))
}

pub fn validate(input: &str) -> bool {
    match parse(input) {
        Some((digits, check)) => compute_check(digits) == check,
        None => false,
    }
}

/// 只保留數字與 K，並轉大寫
pub fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// 重新排版成 `12.345.678-5`，不做驗證
pub fn format(input: &str) -> String {
    let cleaned = clean(input);
    if cleaned.len() < 2 {
        return cleaned;
    }

    // clean 之後只剩 ASCII，可以直接用 byte 切
    let (body, check) = cleaned.split_at(cleaned.len() - 1);

    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);
    for (i, c) in body.chars().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}-{}", grouped, check)
}
