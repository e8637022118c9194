//! Session client for the letter delivery site.
//!
//! Every call is a form-encoded POST carrying the two session cookies.
//! Long contents are split into pages by [`pages::paginate`] and sent in order.

use chrono::NaiveDate;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::Instrument;

use crate::telemetry::{self};
use crate::telemetry::ops::send::Phase as SendPhase;
use crate::util::time::compact_date;

pub mod pages;

use self::pages::Page;

const LOGIN_PATH: &str = "/login/loginA.do";
const SEARCH_PATH: &str = "/main/cafeCreateCheckA.do";
const SEND_PATH: &str = "/consolLetter/insertConsolLetterA.do";

const COOKIE_IUID: &str = "iuid";
const COOKIE_TOKEN: &str = "Token";

// Fixed routing codes for the recipient search.
const TRAIN_UNIT_CODE: &str = "20020191700";
const GROUP_CODE: &str = "0000010001";

const SEARCH_OK: &str = "9999";
const SEND_OK: &str = "0000";

#[derive(Debug, Error)]
pub enum CampError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("session cookies not in login response")]
    MissingCookies,

    #[error("unexpected result code: {code} ({message})")]
    ResultCode { code: String, message: String },

    #[error("no recipient matches the search")]
    RecipientNotFound,

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Identity used to look up the recipient code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub birth: NaiveDate,
    pub entrance: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Session {
    iuid: String,
    token: String,
}

impl Session {
    fn cookie_header(&self) -> String {
        format!("{COOKIE_IUID}={}; {COOKIE_TOKEN}={}", self.iuid, self.token)
    }
}

pub struct CampClient {
    http: HttpClient,
    base_url: String,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct ResultEnvelope {
    #[serde(rename = "resultCd", default)]
    result_code: String,
    #[serde(rename = "resultMsg", default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(flatten)]
    result: ResultEnvelope,
    #[serde(rename = "listResult", default)]
    list_result: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "traineeMgrSeq", default)]
    trainee_mgr_seq: i64,
}

impl CampClient {
    /// Authenticate and capture the session cookies.
    pub async fn login(http: HttpClient, base_url: impl Into<String>, user: &str, pass: &str) -> Result<Self, CampError> {
        let mut client = Self { http, base_url: base_url.into(), session: Session::default() };
        let log = telemetry::send();

        let resp = client.post_form(LOGIN_PATH, &[
            ("state", "email-login"),
            ("autoLoginYn", "N"),
            ("userId", user),
            ("userPwd", pass),
        ]).instrument(log.span(&SendPhase::Login)).await?;
        if resp.status() != StatusCode::OK {
            return Err(CampError::Status(resp.status()));
        }

        for c in resp.cookies() {
            match c.name() {
                COOKIE_IUID => client.session.iuid = c.value().to_string(),
                COOKIE_TOKEN => client.session.token = c.value().to_string(),
                _ => {}
            }
        }
        if client.session.iuid.is_empty() || client.session.token.is_empty() {
            return Err(CampError::MissingCookies);
        }
        Ok(client)
    }

    /// Look up the numeric recipient code.
    pub async fn search(&self, recipient: &Recipient) -> Result<i64, CampError> {
        let log = telemetry::send();
        let birth = compact_date(recipient.birth);
        let entrance = compact_date(recipient.entrance);
        let body: SearchEnvelope = self.post_json(SEARCH_PATH, &[
            ("name", recipient.name.as_str()),
            ("birth", birth.as_str()),
            ("enterDate", entrance.as_str()),
            ("trainUnitCd", TRAIN_UNIT_CODE),
            ("grpCd", GROUP_CODE),
        ]).instrument(log.span(&SendPhase::Search)).await?;

        if body.result.result_code != SEARCH_OK {
            return Err(CampError::ResultCode { code: body.result.result_code, message: body.result.result_msg });
        }
        match body.list_result.as_deref() {
            Some([first, ..]) if first.trainee_mgr_seq != 0 => Ok(first.trainee_mgr_seq),
            _ => Err(CampError::RecipientNotFound),
        }
    }

    /// Paginate `contents` and send the pages strictly in order. Stops at the
    /// first failure; pages already sent stay sent. Returns the page count.
    pub async fn send(&self, code: i64, subject: &str, contents: &str) -> Result<usize, CampError> {
        let pages = pages::paginate(contents);
        for page in &pages {
            self.send_page(code, subject, page).await?;
        }
        Ok(pages.len())
    }

    pub async fn send_page(&self, code: i64, subject: &str, page: &Page) -> Result<(), CampError> {
        let log = telemetry::send();
        let span = log.span_kv(&SendPhase::Page, [("page", page.number.to_string())]);

        let code = code.to_string();
        let title = page.title(subject);
        let body: ResultEnvelope = self.post_json(SEND_PATH, &[
            ("traineeMgrSeq", code.as_str()),
            ("sympathyLetterSubject", title.as_str()),
            ("sympathyLetterContent", page.text.as_str()),
            ("boardDiv", "sympathyLetter"),
            ("tempSaveYn", "N"),
        ]).instrument(span.clone()).await?;

        if body.result_code != SEND_OK {
            return Err(CampError::ResultCode { code: body.result_code, message: body.result_msg });
        }
        span.in_scope(|| log.page_sent(page.number, page.text.len()));
        Ok(())
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<reqwest::Response, CampError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut req = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(form);
        if self.session != Session::default() {
            req = req.header(COOKIE, self.session.cookie_header());
        }
        Ok(req.send().await?)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, form: &[(&str, &str)]) -> Result<T, CampError> {
        let resp = self.post_form(path, form).await?;
        if resp.status() != StatusCode::OK {
            return Err(CampError::Status(resp.status()));
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recipient() -> Recipient {
        Recipient {
            name: "Kim".into(),
            birth: NaiveDate::from_ymd_opt(1999, 11, 5).unwrap(),
            entrance: NaiveDate::from_ymd_opt(2021, 4, 29).unwrap(),
        }
    }

    async fn logged_in(server: &MockServer) -> CampClient {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_string_contains("userId=me"))
            .respond_with(ResponseTemplate::new(200)
                .append_header("Set-Cookie", "iuid=abc; Path=/")
                .append_header("Set-Cookie", "Token=xyz; Path=/"))
            .mount(server)
            .await;
        CampClient::login(HttpClient::new(), server.uri(), "me", "pw").await.unwrap()
    }

    #[tokio::test]
    async fn login_captures_both_cookies() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        assert_eq!(client.session, Session { iuid: "abc".into(), token: "xyz".into() });
    }

    #[tokio::test]
    async fn login_without_cookies_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).append_header("Set-Cookie", "iuid=abc; Path=/"))
            .mount(&server)
            .await;
        let err = CampClient::login(HttpClient::new(), server.uri(), "me", "pw").await.err().unwrap();
        assert!(matches!(err, CampError::MissingCookies));
    }

    #[tokio::test]
    async fn login_bad_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(302))
            .mount(&server)
            .await;
        let http = HttpClient::builder().redirect(reqwest::redirect::Policy::none()).build().unwrap();
        let err = CampClient::login(http, server.uri(), "me", "pw").await.err().unwrap();
        assert!(matches!(err, CampError::Status(s) if s.as_u16() == 302));
    }

    #[tokio::test]
    async fn search_sends_cookies_and_compact_dates() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .and(header("cookie", "iuid=abc; Token=xyz"))
            .and(body_string_contains("birth=19991105"))
            .and(body_string_contains("enterDate=20210429"))
            .and(body_string_contains("trainUnitCd=20020191700"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "9999", "resultMsg": "ok",
                "listResult": [{"traineeMgrSeq": 4242}]
            })))
            .mount(&server)
            .await;

        assert_eq!(client.search(&recipient()).await.unwrap(), 4242);
    }

    #[tokio::test]
    async fn search_with_empty_list_is_not_found() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "9999", "resultMsg": "ok", "listResult": []
            })))
            .mount(&server)
            .await;

        assert!(matches!(client.search(&recipient()).await, Err(CampError::RecipientNotFound)));
    }

    #[tokio::test]
    async fn search_bad_result_code_is_error() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCd": "E001", "resultMsg": "no session"
            })))
            .mount(&server)
            .await;

        let err = client.search(&recipient()).await.unwrap_err();
        assert_eq!(err.to_string(), "unexpected result code: E001 (no session)");
    }

    #[tokio::test]
    async fn empty_document_sends_nothing() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCd": "0000"})))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(client.send(7, "campfeed", "").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn short_document_is_one_numbered_page() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .and(body_string_contains("traineeMgrSeq=7"))
            .and(body_string_contains("sympathyLetterSubject=campfeed%3A+0"))
            .and(body_string_contains("sympathyLetterContent=A%3Cbr%2F%3E%0AB%3Cbr%2F%3E%0A"))
            .and(body_string_contains("boardDiv=sympathyLetter"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCd": "0000"})))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client.send(7, "campfeed", "A\nB\n").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sending_stops_at_first_failed_page() {
        let server = MockServer::start().await;
        let client = logged_in(&server).await;
        let ok = || ResponseTemplate::new(200).set_body_json(json!({"resultCd": "0000"}));
        Mock::given(method("POST")).and(path(SEND_PATH))
            .and(body_string_contains("sympathyLetterSubject=r%3A+0"))
            .respond_with(ok()).expect(1).mount(&server).await;
        Mock::given(method("POST")).and(path(SEND_PATH))
            .and(body_string_contains("sympathyLetterSubject=r%3A+1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCd": "E500", "resultMsg": "full"})))
            .expect(1).mount(&server).await;
        Mock::given(method("POST")).and(path(SEND_PATH))
            .and(body_string_contains("sympathyLetterSubject=r%3A+2"))
            .respond_with(ok()).expect(0).mount(&server).await;

        let doc: String = (0..200).map(|i| format!("line number {i:04} of the report\n")).collect();
        assert!(pages::paginate(&doc).len() >= 3);

        let err = client.send(1, "r", &doc).await.unwrap_err();
        assert!(matches!(err, CampError::ResultCode { ref code, .. } if code == "E500"));
    }
}
