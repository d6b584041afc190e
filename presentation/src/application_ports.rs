use application_ports::dashboard::DashboardPort;
use application_ports::sign_in::SignInPort;
use application_ports::sign_out::SignOutPort;
use std::sync::Arc;

pub trait Locator {
    fn get_sign_out_port(&self) -> Arc<dyn SignOutPort + Send + Sync>;
    fn get_sign_in_port(&self) -> Arc<dyn SignInPort + Send + Sync>;
    fn get_dashboard_port(&self) -> Arc<dyn DashboardPort + Send + Sync>;
}
