pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const DIARY_LOAD_FAILED: &str = "일기를 불러오는 데 실패했습니다.";

/// User-visible alerts. Implemented by whatever surface shows the page.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
