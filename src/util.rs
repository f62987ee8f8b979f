/// セッションIDをマスキングしてログ出力用の文字列を生成
///
/// セッションIDの最初の4文字と最後の4文字のみを表示し、中間を***でマスキング
///
/// # Examples
/// ```
/// use webcast_client::util::mask_session_id;
///
/// let masked = mask_session_id("8f2c1a9b7d6e5f4a3b2c1d0e");
/// assert_eq!(masked, "8f2c***1d0e");
/// ```
pub fn mask_session_id(session_id: &str) -> String {
    // マルチバイト文字を含む場合でも境界で切れるよう文字単位で扱う
    let chars: Vec<char> = session_id.chars().collect();
    let len = chars.len();
    if len <= 8 {
        // 短いIDは全体をマスク
        return "***".to_string();
    }

    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[len - 4..].iter().collect();
    format!("{}***{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_session_id() {
        assert_eq!(
            mask_session_id("8f2c1a9b7d6e5f4a3b2c1d0e"),
            "8f2c***1d0e"
        );

        // 短いID
        assert_eq!(mask_session_id("short"), "***");

        // 空文字列
        assert_eq!(mask_session_id(""), "***");

        // 8文字ちょうど
        assert_eq!(mask_session_id("12345678"), "***");

        // 9文字（マスキング開始）
        assert_eq!(mask_session_id("123456789"), "1234***6789");
    }

    #[test]
    fn test_mask_session_id_multibyte() {
        assert_eq!(mask_session_id("セッションIDテスト値です"), "セッショ***ト値です");
    }
}
