//! Dashboard analytics endpoint

use maqraa_api::dto::dashboard::DashboardStats;

use crate::error::Result;
use crate::http::HttpClient;

impl HttpClient {
    /// Get the back-office dashboard counters
    ///
    /// # Errors
    /// Returns an error if the request fails or the backend rejects it.
    ///
    /// # Example
    /// ```no_run
    /// # use maqraa_client::HttpClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpClient::new("http://localhost:5000")?;
    /// let stats = client.dashboard_stats().await?;
    /// println!("students: {:?}", stats.student_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/api/dashboard/stats").await
    }
}
