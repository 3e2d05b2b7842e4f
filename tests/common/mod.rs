//! In-process stand-in for the canteen backend, built on axum.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{self, Body};
use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use canteen_portal::models::{
    Canteen, CanteenPayload, CommitteeMember, CommitteeMemberPayload, Complaint, ComplaintStatus,
    FeedbackQuestion, FeedbackQuestionPayload, NewComplaint,
};
use canteen_portal::session::MemorySessionStorage;
use canteen_portal::{Config, Credentials, PortalContext};

pub const VALID_TOKEN: &str = "valid-token";
pub const EMAIL: &str = "asha@campus.edu";
pub const PASSWORD: &str = "secret";
/// Questions requested for this canteen fail with a 500
pub const BROKEN_CANTEEN: i64 = 99;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    /// Request body, when it was JSON
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub file_name: Option<String>,
    pub size: usize,
}

pub struct Backend {
    pub requests: Mutex<Vec<Recorded>>,
    pub canteens: Mutex<Vec<Canteen>>,
    pub complaints: Mutex<Vec<Complaint>>,
    pub feedback: Mutex<Vec<(i64, Value)>>,
    pub committee: Mutex<Vec<CommitteeMember>>,
    pub uploads: Mutex<Vec<Upload>>,
    pub questions: Mutex<Vec<FeedbackQuestion>>,
    pub reject_committee_saves: AtomicBool,
    /// Acknowledge committee creates with text instead of the new record
    pub text_committee_creates: AtomicBool,
    next_id: AtomicI64,
}

impl Backend {
    fn new() -> Self {
        let seeded = Complaint {
            id: 1,
            canteen_id: 7,
            title: "Cold food".to_string(),
            description: "Lunch was served cold".to_string(),
            status: ComplaintStatus::Pending,
            created_at: None,
            student_id: Some("21CS042".to_string()),
            student_name: Some("Asha".to_string()),
            attachment_key: None,
        };

        Self {
            requests: Mutex::new(Vec::new()),
            canteens: Mutex::new(Vec::new()),
            complaints: Mutex::new(vec![seeded]),
            feedback: Mutex::new(Vec::new()),
            committee: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
            reject_committee_saves: AtomicBool::new(false),
            text_committee_creates: AtomicBool::new(false),
            next_id: AtomicI64::new(100),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Most recent request to `path`; panics when there was none
    pub fn last_request_to(&self, path: &str) -> Recorded {
        self.requests_to(path)
            .pop()
            .unwrap_or_else(|| panic!("no request to {path}"))
    }
}

type Shared = Arc<Backend>;

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid or expired token"}))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == format!("Bearer {VALID_TOKEN}"))
}

async fn record(State(backend): State<Shared>, request: Request, next: Next) -> Response {
    let (parts, raw) = request.into_parts();
    let bytes = body::to_bytes(raw, usize::MAX).await.unwrap_or_default();
    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
    };
    backend.requests.lock().unwrap().push(recorded);
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["emailId"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({
            "user": {
                "studentId": "21CS042",
                "name": "Asha",
                "emailId": EMAIL,
                "mobileNumber": "9876543210"
            },
            "token": VALID_TOKEN
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))).into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["emailId"] == EMAIL {
        return (StatusCode::CONFLICT, "Email already registered").into_response();
    }
    "User registered successfully".into_response()
}

async fn send_otp(Json(body): Json<Value>) -> Response {
    match body["emailId"].as_str() {
        Some(email) if email.contains('@') => "OTP sent successfully".into_response(),
        _ => (StatusCode::BAD_REQUEST, Json(json!({"message": "Invalid email"}))).into_response(),
    }
}

async fn verify_otp(Json(body): Json<Value>) -> Response {
    if body["otp"] == "123456" {
        "OTP verified successfully".into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"message": "Invalid OTP"}))).into_response()
    }
}

async fn list_canteens(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(backend.canteens.lock().unwrap().clone()).into_response()
}

async fn public_canteens(State(backend): State<Shared>) -> Response {
    Json(backend.canteens.lock().unwrap().clone()).into_response()
}

fn find_canteen(backend: &Backend, id: i64) -> Response {
    match backend.canteens.lock().unwrap().iter().find(|c| c.id == id) {
        Some(canteen) => Json(canteen.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Canteen not found"}))).into_response(),
    }
}

async fn get_canteen(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    find_canteen(&backend, id)
}

async fn public_canteen(State(backend): State<Shared>, Path(id): Path<i64>) -> Response {
    find_canteen(&backend, id)
}

async fn create_canteen(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<CanteenPayload>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let canteen = Canteen {
        id: backend.next_id(),
        name: payload.name,
        info: payload.info,
        certificate_url: payload.certificate_url,
        image_url: payload.image_url,
        menu_path: payload.menu_path,
    };
    backend.canteens.lock().unwrap().push(canteen);
    "Canteen added successfully".into_response()
}

async fn update_canteen(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<CanteenPayload>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut canteens = backend.canteens.lock().unwrap();
    match canteens.iter_mut().find(|c| c.id == id) {
        Some(canteen) => {
            canteen.name = payload.name;
            canteen.info = payload.info;
            canteen.certificate_url = payload.certificate_url;
            canteen.image_url = payload.image_url;
            canteen.menu_path = payload.menu_path;
            "Canteen updated successfully".into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Canteen not found"}))).into_response(),
    }
}

async fn delete_canteen(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    backend.canteens.lock().unwrap().retain(|c| c.id != id);
    "Canteen deleted successfully".into_response()
}

async fn file_complaint(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<NewComplaint>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let complaint = Complaint {
        id: backend.next_id(),
        canteen_id: payload.canteen_id,
        title: payload.title,
        description: payload.description,
        status: ComplaintStatus::Pending,
        created_at: None,
        student_id: Some("21CS042".to_string()),
        student_name: Some("Asha".to_string()),
        attachment_key: payload.attachment_key,
    };
    backend.complaints.lock().unwrap().push(complaint);
    "Complaint registered successfully".into_response()
}

async fn my_complaints(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mine: Vec<Complaint> = backend
        .complaints
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.student_id.as_deref() == Some("21CS042"))
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn all_complaints(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(backend.complaints.lock().unwrap().clone()).into_response()
}

async fn update_complaint_status(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let Some(status) = body["status"].as_str().and_then(|s| s.parse::<ComplaintStatus>().ok()) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Unknown status"}))).into_response();
    };
    let mut complaints = backend.complaints.lock().unwrap();
    match complaints.iter_mut().find(|c| c.id == id) {
        Some(complaint) => {
            complaint.status = status;
            "Complaint status updated".into_response()
        }
        None => (StatusCode::NOT_FOUND, "Complaint not found").into_response(),
    }
}

async fn escalate_complaint(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut complaints = backend.complaints.lock().unwrap();
    if let Some(complaint) = complaints.iter_mut().find(|c| c.id == id) {
        complaint.status = ComplaintStatus::Escalated;
    }
    "Complaint escalated".into_response()
}

async fn list_questions(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(backend.questions.lock().unwrap().clone()).into_response()
}

async fn create_question(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<FeedbackQuestionPayload>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let question = FeedbackQuestion {
        id: backend.next_id(),
        canteen_id: Some(payload.canteen_id),
        question_text: payload.question_text,
    };
    backend.questions.lock().unwrap().push(question.clone());
    (StatusCode::CREATED, Json(question)).into_response()
}

async fn update_question(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<FeedbackQuestionPayload>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut questions = backend.questions.lock().unwrap();
    match questions.iter_mut().find(|q| q.id == id) {
        Some(question) => {
            question.canteen_id = Some(payload.canteen_id);
            question.question_text = payload.question_text;
            "Question updated successfully".into_response()
        }
        None => (StatusCode::NOT_FOUND, "Question not found").into_response(),
    }
}

async fn delete_question(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    backend.questions.lock().unwrap().retain(|q| q.id != id);
    "Question deleted successfully".into_response()
}

async fn feedback_responses(headers: HeaderMap, Path(canteen_id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if canteen_id != 7 {
        return Json(Vec::<Value>::new()).into_response();
    }
    Json(json!([
        {"id": 1, "questionId": 101, "option": "VERY_GOOD", "reason": "Great"},
        {"id": 2, "questionId": 101, "option": "GOOD", "reason": ""},
        {"id": 3, "questionId": 102, "option": "POOR", "reason": "Slow", "createdAt": "2025-03-04T10:15:00"}
    ]))
    .into_response()
}

async fn canteen_questions(headers: HeaderMap, Path(canteen_id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if canteen_id == BROKEN_CANTEEN {
        return (StatusCode::INTERNAL_SERVER_ERROR, "").into_response();
    }
    Json(vec![FeedbackQuestion {
        id: 101,
        canteen_id: Some(canteen_id),
        question_text: "How was the food?".to_string(),
    }])
    .into_response()
}

async fn submit_feedback(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(canteen_id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    backend.feedback.lock().unwrap().push((canteen_id, body));
    "Feedback submitted successfully".into_response()
}

async fn create_announcement(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["title"].as_str().is_none_or(str::is_empty) {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Title is required"}))).into_response();
    }
    "Announcement created successfully".into_response()
}

async fn active_announcements(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "Announcements service down"}))).into_response()
}

async fn monthly_report(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let month = query.get("month").cloned().unwrap_or_default();
    format!("# Canteen report for {month}\n\nOverall satisfaction improved.").into_response()
}

async fn create_member(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<CommitteeMemberPayload>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if backend.reject_committee_saves.load(Ordering::SeqCst) {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Email already used"}))).into_response();
    }
    let member = CommitteeMember {
        id: backend.next_id(),
        name: payload.name,
        email: payload.email,
        designation: payload.designation,
        role: payload.role,
        student_id: payload.student_id,
        photo_url: payload.photo_url,
    };
    backend.committee.lock().unwrap().push(member.clone());
    if backend.text_committee_creates.load(Ordering::SeqCst) {
        return "Member added successfully".into_response();
    }
    (StatusCode::CREATED, Json(member)).into_response()
}

async fn list_members(State(backend): State<Shared>) -> Response {
    Json(backend.committee.lock().unwrap().clone()).into_response()
}

async fn delete_member(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    backend.committee.lock().unwrap().retain(|m| m.id != id);
    "Member deleted successfully".into_response()
}

async fn update_member(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<CommitteeMemberPayload>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if backend.reject_committee_saves.load(Ordering::SeqCst) {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Email already used"}))).into_response();
    }
    let mut committee = backend.committee.lock().unwrap();
    match committee.iter_mut().find(|m| m.id == id) {
        Some(member) => {
            member.name = payload.name;
            member.email = payload.email;
            member.designation = payload.designation;
            member.role = payload.role;
            member.student_id = payload.student_id;
            member.photo_url = payload.photo_url;
            "Member updated successfully".into_response()
        }
        None => (StatusCode::NOT_FOUND, "Member not found").into_response(),
    }
}

async fn upload_photo(State(backend): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut url = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let Ok(bytes) = field.bytes().await else {
            return (StatusCode::BAD_REQUEST, "Broken upload").into_response();
        };
        url = file_name
            .as_ref()
            .map(|f| format!("https://cdn.campus.edu/committee/{f}"));
        backend.uploads.lock().unwrap().push(Upload {
            field: name,
            file_name,
            size: bytes.len(),
        });
    }
    match url {
        Some(url) => url.into_response(),
        None => (StatusCode::BAD_REQUEST, "No file").into_response(),
    }
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/admin/canteens", get(list_canteens).post(create_canteen))
        .route(
            "/admin/canteens/{id}",
            get(get_canteen).put(update_canteen).delete(delete_canteen),
        )
        .route("/api/canteens", get(public_canteens))
        .route("/api/canteens/{id}", get(public_canteen))
        .route("/user/complaints", post(file_complaint))
        .route("/user/complaints/mycomplaints", get(my_complaints))
        .route("/admin/complaints/allComplaints", get(all_complaints))
        .route("/admin/complaints/{id}/status", put(update_complaint_status))
        .route("/admin/complaints/{id}/escalate", post(escalate_complaint))
        .route("/admin/feedback/question", get(list_questions).post(create_question))
        .route(
            "/admin/feedback/question/{id}",
            put(update_question).delete(delete_question),
        )
        .route("/admin/feedback/canteen/{id}/responses", get(feedback_responses))
        .route("/user/feedback/canteen/{id}/questions", get(canteen_questions))
        .route("/user/feedback/canteen/{id}/submit", post(submit_feedback))
        .route("/admin/announcement/create", post(create_announcement))
        .route("/admin/announcement/active", get(active_announcements))
        .route("/admin/reports/llm-monthly", get(monthly_report))
        .route("/api/committee", get(list_members))
        .route("/admin/committee", post(create_member))
        .route("/admin/committee/upload-photo", post(upload_photo))
        .route("/admin/committee/{id}", put(update_member).delete(delete_member))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

pub struct TestPortal {
    pub backend: Arc<Backend>,
    pub storage: Arc<MemorySessionStorage>,
    pub ctx: PortalContext,
}

/// Start a backend on an ephemeral port and a context pointing at it
pub async fn portal() -> TestPortal {
    let backend = Arc::new(Backend::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::new(
        &format!("http://{addr}"),
        Duration::from_secs(5),
        "unused-session.json",
    )
    .unwrap();
    let storage = Arc::new(MemorySessionStorage::new());
    let ctx = PortalContext::new(config, storage.clone()).unwrap();
    ctx.initialize().await;

    TestPortal { backend, storage, ctx }
}

pub async fn logged_in_portal() -> TestPortal {
    let portal = portal().await;
    portal
        .ctx
        .login(&Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    portal
}
