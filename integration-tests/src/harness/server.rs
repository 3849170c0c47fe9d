use crate::harness::{CapturedEvent, TestSite, init_test_tracing};
use gzserve_core::conf::resolve_config;
use gzserve_core::conf::types::ConfigSpec;
use gzserve_core::server::{build_pingora_server, build_runtime_state};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::redirect::Policy;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(2);

/// A gzserve instance on an ephemeral port, running on a background thread for the rest of the
/// test binary.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    pub fn start(site: &TestSite) -> Self {
        Self::start_with(site, |_| {})
    }

    /// `configure` sees the default config; listen address, thread count and asset root are
    /// set afterwards and cannot be overridden.
    pub fn start_with(site: &TestSite, configure: impl FnOnce(&mut ConfigSpec)) -> Self {
        init_test_tracing(events());

        let addr = SocketAddr::from(([127, 0, 0, 1], unused_port()));

        let mut spec = ConfigSpec::default();
        configure(&mut spec);
        spec.server.listen = addr.to_string();
        spec.server.threads = Some(1);
        spec.assets.root = site.root().to_path_buf();

        let config = resolve_config(spec, site.root());
        let state = Arc::new(build_runtime_state(&config));
        let server = build_pingora_server(&config, state).expect("gzserve server did not build");
        thread::spawn(move || {
            server.run_forever();
        });

        let listening = poll_until(STARTUP_TIMEOUT, Duration::from_millis(25), || {
            TcpStream::connect(addr).ok().map(drop)
        });
        assert!(listening.is_some(), "gzserve did not start listening on {addr}");

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .redirect(Policy::none())
            .build()
            .expect("reqwest client did not build");

        Self { addr, client }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{path}", self.base_url()))
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Events from every server in this test binary.
fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();
    Arc::clone(EVENTS.get_or_init(Default::default))
}

/// First captured event matching `predicate`, waiting briefly for it to be logged.
pub fn wait_for_event(predicate: impl Fn(&CapturedEvent) -> bool) -> Option<CapturedEvent> {
    poll_until(Duration::from_secs(2), Duration::from_millis(10), || {
        let events = events();
        let events = events.lock().unwrap();
        events.iter().find(|e| predicate(e)).cloned()
    })
}

fn poll_until<T>(
    timeout: Duration,
    interval: Duration,
    mut probe: impl FnMut() -> Option<T>,
) -> Option<T> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(found) = probe() {
            return Some(found);
        }
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(interval);
    }
}

/// Asks the OS for a port nobody is listening on, so parallel tests do not collide.
fn unused_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .unwrap()
}
