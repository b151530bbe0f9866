#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use adforge_core::generation::VideoJobRequest;
use adforge_core::image_models::ImageJobRequest;
use adforge_core::status::{initial_vendor_status, JobStatus, Submission};
use adforge_core::vendor::Vendor;
use adforge_vendors::{ImageVendor, PredictionVendor, VendorError, VideoVendor};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use adforge_api::router::build_app_router;
use adforge_api::state::AppState;

// ---------------------------------------------------------------------------
// Fake vendor
// ---------------------------------------------------------------------------

/// In-memory vendor that answers every call from canned data and records
/// what it was asked to do.
pub struct FakeVendor {
    vendor: Vendor,
    configured: bool,
    /// Status string reported by `poll`.
    vendor_status: String,
    output: Option<String>,
    error: Option<String>,
    /// When set, every submit/poll fails with this vendor API error.
    api_failure: Option<(u16, serde_json::Value)>,
    /// How long each vendor call takes.
    latency: Duration,
    calls: AtomicUsize,
    last_video_job: Mutex<Option<VideoJobRequest>>,
    last_image_job: Mutex<Option<ImageJobRequest>>,
    last_polled_id: Mutex<Option<String>>,
}

impl FakeVendor {
    pub fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            configured: true,
            vendor_status: initial_vendor_status(vendor).to_string(),
            output: None,
            error: None,
            api_failure: None,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_video_job: Mutex::new(None),
            last_image_job: Mutex::new(None),
            last_polled_id: Mutex::new(None),
        }
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn reporting(mut self, vendor_status: &str, output: Option<&str>) -> Self {
        self.vendor_status = vendor_status.to_string();
        self.output = output.map(str::to_string);
        self
    }

    pub fn with_error_detail(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn failing(mut self, status: u16, body: serde_json::Value) -> Self {
        self.api_failure = Some((status, body));
        self
    }

    pub fn slow(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_video_job(&self) -> Option<VideoJobRequest> {
        self.last_video_job.lock().unwrap().clone()
    }

    pub fn last_image_job(&self) -> Option<ImageJobRequest> {
        self.last_image_job.lock().unwrap().clone()
    }

    pub fn last_polled_id(&self) -> Option<String> {
        self.last_polled_id.lock().unwrap().clone()
    }

    fn record_call(&self) -> Result<(), VendorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.api_failure {
            Some((status, body)) => Err(VendorError::Api {
                vendor: self.vendor,
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }

    fn submission(&self) -> Submission {
        Submission {
            id: format!("{}-job-1", self.vendor),
            vendor_status: initial_vendor_status(self.vendor).to_string(),
        }
    }
}

#[async_trait]
impl PredictionVendor for FakeVendor {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn poll(&self, id: &str) -> Result<JobStatus, VendorError> {
        tokio::time::sleep(self.latency).await;
        self.record_call()?;
        *self.last_polled_id.lock().unwrap() = Some(id.to_string());
        Ok(JobStatus::from_vendor(
            self.vendor,
            id.to_string(),
            self.vendor_status.clone(),
            self.output.clone(),
            self.error.clone(),
            None,
        ))
    }
}

#[async_trait]
impl VideoVendor for FakeVendor {
    async fn submit_video(&self, job: &VideoJobRequest) -> Result<Submission, VendorError> {
        self.record_call()?;
        *self.last_video_job.lock().unwrap() = Some(job.clone());
        Ok(self.submission())
    }
}

#[async_trait]
impl ImageVendor for FakeVendor {
    async fn submit_image(&self, job: &ImageJobRequest) -> Result<Submission, VendorError> {
        self.record_call()?;
        *self.last_image_job.lock().unwrap() = Some(job.clone());
        Ok(self.submission())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Vendors wired into a test app, kept so tests can inspect them.
pub struct TestVendors {
    pub runway: Arc<FakeVendor>,
    pub replicate: Arc<FakeVendor>,
    pub images: Arc<FakeVendor>,
}

impl Default for TestVendors {
    fn default() -> Self {
        Self {
            runway: Arc::new(FakeVendor::new(Vendor::Runway)),
            replicate: Arc::new(FakeVendor::new(Vendor::Replicate)),
            images: Arc::new(FakeVendor::new(Vendor::Replicate)),
        }
    }
}

/// Build the full application router (same middleware stack as
/// production) around the given fake vendors.
pub fn build_test_app(vendors: &TestVendors) -> Router {
    let state = AppState {
        runway: vendors.runway.clone(),
        replicate: vendors.replicate.clone(),
        images: vendors.images.clone(),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

/// POST an arbitrary (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn options(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header("Origin", "https://studio.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization, content-type")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
