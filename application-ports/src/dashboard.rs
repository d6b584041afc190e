use async_trait::async_trait;
use domain_shared::student::StudentName;
use thiserror::Error;

/// Read side of the tracker: the staff views and the home-page quota lookup.
/// Implementations run the stale-pass sweep before the read-heavy views.
#[async_trait]
pub trait DashboardPort {
    async fn currently_out(&self) -> Result<CurrentlyOutView, DashboardError>;
    async fn student_list(&self) -> Result<StudentListView, DashboardError>;
    async fn quarter_usage(&self, student: StudentName) -> Result<QuarterUsage, DashboardError>;
    /// One-shot stale-pass sweep; returns how many rows were closed.
    async fn reclaim_stale(&self) -> Result<usize, DashboardError>;
}

#[derive(Debug, Clone)]
pub struct OpenPassView {
    pub first_name: String,
    pub last_name: String,
    pub period: String,
    pub teacher: String,
    pub reason: String,
    pub time_out: String,
}

#[derive(Debug, Clone)]
pub struct StudentPassCount {
    pub name: String,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct CurrentlyOutView {
    pub open: Vec<OpenPassView>,
    pub counts: Vec<StudentPassCount>,
}

#[derive(Debug, Clone)]
pub struct StudentListView {
    pub counts: Vec<StudentPassCount>,
    pub active_quarter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuarterUsage {
    pub student: StudentName,
    pub used: usize,
    pub allowed: usize,
    pub active_quarter: Option<String>,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Service is temporarily unavailable. Please try again.")]
    TemporaryUnavailable,
}
