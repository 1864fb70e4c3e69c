//! Vietnamese accent folding.
//!
//! The mapping is a fixed character table, not locale-dependent Unicode
//! normalization: `đ` folds to `d` and `ỷ` to `y`, where an NFKD-based
//! ASCII fold would leave them untouched. Code points outside the table
//! pass through unchanged.

use std::sync::LazyLock;

use hashbrown::HashMap;

/// Accented source letters and their ASCII replacements.
const FOLD_PAIRS: &[(char, char)] = &[
    ('À', 'A'),
    ('Á', 'A'),
    ('Â', 'A'),
    ('Ã', 'A'),
    ('È', 'E'),
    ('É', 'E'),
    ('Ê', 'E'),
    ('Ì', 'I'),
    ('Í', 'I'),
    ('Ò', 'O'),
    ('Ó', 'O'),
    ('Ô', 'O'),
    ('Õ', 'O'),
    ('Ù', 'U'),
    ('Ú', 'U'),
    ('Ý', 'Y'),
    ('à', 'a'),
    ('á', 'a'),
    ('â', 'a'),
    ('ã', 'a'),
    ('è', 'e'),
    ('é', 'e'),
    ('ê', 'e'),
    ('ì', 'i'),
    ('í', 'i'),
    ('ò', 'o'),
    ('ó', 'o'),
    ('ô', 'o'),
    ('õ', 'o'),
    ('ù', 'u'),
    ('ú', 'u'),
    ('ý', 'y'),
    ('Ă', 'A'),
    ('ă', 'a'),
    ('Đ', 'D'),
    ('đ', 'd'),
    ('Ĩ', 'I'),
    ('ĩ', 'i'),
    ('Ũ', 'U'),
    ('ũ', 'u'),
    ('Ơ', 'O'),
    ('ơ', 'o'),
    ('Ư', 'U'),
    ('ư', 'u'),
    ('Ạ', 'A'),
    ('ạ', 'a'),
    ('Ả', 'A'),
    ('ả', 'a'),
    ('Ấ', 'A'),
    ('ấ', 'a'),
    ('Ầ', 'A'),
    ('ầ', 'a'),
    ('Ẩ', 'A'),
    ('ẩ', 'a'),
    ('Ẫ', 'A'),
    ('ẫ', 'a'),
    ('Ậ', 'A'),
    ('ậ', 'a'),
    ('Ắ', 'A'),
    ('ắ', 'a'),
    ('Ằ', 'A'),
    ('ằ', 'a'),
    ('Ẳ', 'A'),
    ('ẳ', 'a'),
    ('Ẵ', 'A'),
    ('ẵ', 'a'),
    ('Ặ', 'A'),
    ('ặ', 'a'),
    ('Ẹ', 'E'),
    ('ẹ', 'e'),
    ('Ẻ', 'E'),
    ('ẻ', 'e'),
    ('Ẽ', 'E'),
    ('ẽ', 'e'),
    ('Ế', 'E'),
    ('ế', 'e'),
    ('Ề', 'E'),
    ('ề', 'e'),
    ('Ể', 'E'),
    ('ể', 'e'),
    ('Ễ', 'E'),
    ('ễ', 'e'),
    ('Ệ', 'E'),
    ('ệ', 'e'),
    ('Ỉ', 'I'),
    ('ỉ', 'i'),
    ('Ị', 'I'),
    ('ị', 'i'),
    ('Ọ', 'O'),
    ('ọ', 'o'),
    ('Ỏ', 'O'),
    ('ỏ', 'o'),
    ('Ố', 'O'),
    ('ố', 'o'),
    ('Ồ', 'O'),
    ('ồ', 'o'),
    ('Ổ', 'O'),
    ('ổ', 'o'),
    ('Ỗ', 'O'),
    ('ỗ', 'o'),
    ('Ộ', 'O'),
    ('ộ', 'o'),
    ('Ớ', 'O'),
    ('ớ', 'o'),
    ('Ờ', 'O'),
    ('ờ', 'o'),
    ('Ở', 'O'),
    ('ở', 'o'),
    ('Ỡ', 'O'),
    ('ỡ', 'o'),
    ('Ợ', 'O'),
    ('ợ', 'o'),
    ('Ụ', 'U'),
    ('ụ', 'u'),
    ('Ủ', 'U'),
    ('ủ', 'u'),
    ('Ứ', 'U'),
    ('ứ', 'u'),
    ('Ừ', 'U'),
    ('ừ', 'u'),
    ('Ử', 'U'),
    ('ử', 'u'),
    ('Ữ', 'U'),
    ('ữ', 'u'),
    ('Ự', 'U'),
    ('ự', 'u'),
    ('ỹ', 'y'),
    ('ỳ', 'y'),
    ('ỷ', 'y'),
    ('ỵ', 'y'),
    ('Ỹ', 'Y'),
    ('Ỳ', 'Y'),
    ('Ỷ', 'Y'),
    ('Ỵ', 'Y'),
    // Seen in the wild in place of đ and i.
    ('ð', 'd'),
    ('į', 'i'),
];

static FOLD_TABLE: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| FOLD_PAIRS.iter().copied().collect());

/// Folds a single character to its ASCII base letter.
pub fn fold_char(ch: char) -> char {
    FOLD_TABLE.get(&ch).copied().unwrap_or(ch)
}

/// Replaces every accented letter in the string with its ASCII base.
pub fn fold_accents(input: &str) -> String {
    input.chars().map(fold_char).collect()
}
