use rand::Rng;

// 房间码字符集，与学生端输入键盘对齐，全大写加数字
const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 生成指定长度的随机房间码
///
/// 唯一性由调用方结合存储层查重保证，这里只负责随机性。
pub fn generate_room_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ROOM_CODE_CHARSET.len());
            ROOM_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_room_code(6).len(), 6);
        assert_eq!(generate_room_code(8).len(), 8);
        assert_eq!(generate_room_code(0).len(), 0);
    }

    #[test]
    fn test_code_charset() {
        let code = generate_room_code(64);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_codes_vary() {
        // 64 位码撞车概率可以忽略，重复说明随机源坏了
        let a = generate_room_code(64);
        let b = generate_room_code(64);
        assert_ne!(a, b);
    }
}
