// URL处理工具函数
// 负责上传文件地址和头像地址的生成

use reqwest::Url;

/// 判断是否为绝对的 http(s) 地址
pub fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// 将可能是相对路径的地址转换为绝对地址
///
/// # Arguments
/// * `base_url` - 后台基础地址 (不含结尾斜杠)
/// * `path` - 绝对地址、以 / 开头的路径或相对路径
///
/// # Returns
/// * 绝对地址，空值返回None
pub fn to_absolute_url(base_url: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    if is_absolute_url(path) {
        return Some(path.to_string());
    }

    let base_url = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{}{}", base_url, path))
    } else {
        Some(format!("{}/{}", base_url, path))
    }
}

/// 付款截图地址规范化
///
/// 绝对地址原样返回；包含 / 的值视为路径；纯文件名放到 /uploads/ 目录下
pub fn screenshot_url(base_url: &str, screenshot: &str) -> Option<String> {
    let screenshot = screenshot.trim();
    if screenshot.is_empty() {
        return None;
    }

    if is_absolute_url(screenshot) || screenshot.contains('/') {
        to_absolute_url(base_url, screenshot)
    } else {
        to_absolute_url(base_url, &format!("/uploads/{}", screenshot))
    }
}

/// 根据显示名称生成首字母头像地址
///
/// 同一名字总是得到同一地址
pub fn avatar_url(avatar_base: &str, name: &str) -> String {
    match Url::parse_with_params(avatar_base, &[("seed", name)]) {
        Ok(url) => url.to_string(),
        Err(_) => avatar_base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:3000";

    #[test]
    fn test_to_absolute_url() {
        assert_eq!(to_absolute_url(BASE, "/uploads/a.png").as_deref(), Some("http://localhost:3000/uploads/a.png"));
        assert_eq!(to_absolute_url(BASE, "uploads/a.png").as_deref(), Some("http://localhost:3000/uploads/a.png"));
        assert_eq!(to_absolute_url("http://localhost:3000/", "/x").as_deref(), Some("http://localhost:3000/x"));
        assert_eq!(to_absolute_url(BASE, ""), None);
    }

    #[test]
    fn test_screenshot_url() {
        assert_eq!(
            screenshot_url(BASE, "https://res.cloudinary.com/demo/receipt.jpg").as_deref(),
            Some("https://res.cloudinary.com/demo/receipt.jpg")
        );
        assert_eq!(
            screenshot_url(BASE, "receipt-17.jpg").as_deref(),
            Some("http://localhost:3000/uploads/receipt-17.jpg")
        );
        assert_eq!(
            screenshot_url(BASE, "/media/receipt.jpg").as_deref(),
            Some("http://localhost:3000/media/receipt.jpg")
        );
        assert_eq!(screenshot_url(BASE, "   "), None);
    }

    #[test]
    fn test_avatar_url_is_deterministic() {
        let base = "https://api.dicebear.com/7.x/initials/svg";
        let first = avatar_url(base, "Ana Maria");
        assert_eq!(first, avatar_url(base, "Ana Maria"));
        assert!(first.starts_with("https://api.dicebear.com/7.x/initials/svg?seed=Ana"));
        assert_ne!(first, avatar_url(base, "Bob"));
    }
}
