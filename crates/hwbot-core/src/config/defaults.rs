pub(super) fn default_retry_period() -> u64 {
    600
}
pub(super) fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}
pub(super) fn default_request_timeout() -> u64 {
    30
}
pub(super) fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}
pub(super) fn default_log_level() -> String {
    "debug".to_string()
}
