mod command;
#[allow(clippy::module_inception)]
mod dashboard;
mod gauge;
#[cfg(test)]
mod tests;

pub use dashboard::Dashboard;
