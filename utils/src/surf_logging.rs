use std::time::Instant;
use surf::middleware::{Middleware, Next};
use surf::{Client, Request, Response, Result};

/// Surf middleware that logs every outgoing request together with the
/// response status and how long the round trip took.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfLogging;

#[surf::utils::async_trait]
impl Middleware for SurfLogging {
    async fn handle(&self, req: Request, client: Client, next: Next<'_>) -> Result<Response> {
        let method = req.method();
        let url = req.url().to_string();
        log::debug!("--> {} {}", method, url);

        let start = Instant::now();
        match next.run(req, client).await {
            Ok(res) => {
                let status = res.status();
                if status.is_success() {
                    log::debug!("<-- {} {} {} ({:?})", status, method, url, start.elapsed());
                } else {
                    log::warn!("<-- {} {} {} ({:?})", status, method, url, start.elapsed());
                }
                Ok(res)
            }
            Err(err) => {
                log::warn!("<-- failed {} {}: {} ({:?})", method, url, err, start.elapsed());
                Err(err)
            }
        }
    }
}
