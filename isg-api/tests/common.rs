#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::OnceLock;

use isg_api::AppState;
use isg_common::DeviceTable;
use isg_common::observability::{LogConfig, LogFormat};
use isg_http::HttpClient;
use isg_scrape::IsgClient;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "isg-tests".to_string(),
            log_dir: Some(std::env::temp_dir().join("isg-tests")),
            emit_stderr: true,
            format: if std::env::var("ISG_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        isg_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// Canned ISG pages: no statistics table rows, every fixed value present.
pub const CANNED_PAGES: [(&str, &str); 6] = [
    ("1,0", "<html><table class=\"info\"></table></html>"),
    ("1,2", "<html><table class=\"info\"></table></html>"),
    (
        "4,2",
        r#"<input id="aval456" value="AUS" readonly="readonly" class="dropdown dropdown_wert" style="width:3.6em">"#,
    ),
    (
        "4,0",
        "<script>\njsvalues['16']['id']='val16'; jsvalues['16']['val']='21,0';\n\
         jsvalues['17']['id']='val17'; jsvalues['17']['val']='17,5';\n\
         jsvalues['25']['id']='val25'; jsvalues['25']['val']='0,6';\n</script>",
    ),
    (
        "4,1",
        "<script>\njsvalues['22']['id']='val22'; jsvalues['22']['val']='52,0';\n\
         jsvalues['23']['id']='val23'; jsvalues['23']['val']='44,0';\n</script>",
    ),
    (
        "0",
        "<script>\njsobj['id']='val16info';\njsobj['val']='22,9';\n\
         jsobj['id']='val22info';\njsobj['val']='49,1';\n</script>\n\
         <input class=\"value curpoi\" readonly=\"readonly\" id=\"aval1\" name=\"aval1\" type=\"text\" value=\"KOMFORTBETRIEB\" style=\"width:255px\">",
    ),
];

/// Mock ISG serving [`CANNED_PAGES`] and echoing the posted body from `save.php`.
pub async fn mock_isg() -> MockServer {
    let server = MockServer::start().await;
    for (s, body) in CANNED_PAGES {
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("s", s))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/save.php"))
        .respond_with(|req: &wiremock::Request| {
            ResponseTemplate::new(200).set_body_bytes(req.body.clone())
        })
        .mount(&server)
        .await;
    server
}

/// Start the API against `device_base` on an ephemeral port.
pub async fn spawn_api(device_base: &str) -> SocketAddr {
    init_test_tracing();
    let table = DeviceTable::default();
    let http = HttpClient::new(device_base).expect("device base url");
    let state = AppState::new(IsgClient::new(http, &table), table);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, isg_api::create_router(state))
            .await
            .expect("serve");
    });
    addr
}
