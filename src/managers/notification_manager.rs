/// Receives the success message after a buy or list is confirmed.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("✅ {}", message);
    }
}
