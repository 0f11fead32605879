//! Minimal HTTP/1.1 JSON-RPC server standing in for the Zabbix API.

#![allow(clippy::expect_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};

pub const USER: &str = "monitor";
pub const PASSWORD: &str = "secret";
pub const SESSION: &str = "0424bd59b807674191e7d77572075f33";

/// A running fake. The listener thread lives until the test process exits.
pub struct FakeZabbix {
    /// Frontend URL to configure as `RUNOVER_INVENTORY_URL`.
    pub url: String,
    /// `Authorization` header of every request, in arrival order.
    pub auth_headers: Arc<Mutex<Vec<String>>>,
}

pub fn start() -> FakeZabbix {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let auth_headers = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&auth_headers);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let seen = Arc::clone(&seen);
            thread::spawn(move || serve(stream, &seen));
        }
    });

    FakeZabbix {
        url: format!("http://{addr}/zabbix"),
        auth_headers,
    }
}

/// Serve keep-alive requests on one connection until the client hangs up.
fn serve(stream: TcpStream, seen: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut writer = stream;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }

        let mut content_length = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                return;
            }
            let header = line.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                match name.to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap_or(0),
                    "authorization" => seen
                        .lock()
                        .expect("lock")
                        .push(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        let mut body = vec![0; content_length];
        if reader.read_exact(&mut body).is_err() {
            return;
        }
        let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let reply = respond(&request).to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{reply}",
            reply.len()
        );
        if writer.write_all(response.as_bytes()).is_err() {
            return;
        }
    }
}

fn respond(request: &Value) -> Value {
    let id = request["id"].clone();
    let params = &request["params"];
    let result = match request["method"].as_str() {
        Some("user.login") => {
            if params["username"] == USER && params["password"] == PASSWORD {
                json!(SESSION)
            } else {
                return json!({
                    "jsonrpc": "2.0",
                    "error": {
                        "code": -32602,
                        "message": "Invalid params.",
                        "data": "Incorrect user name or password or account is temporarily blocked."
                    },
                    "id": id
                });
            }
        }
        Some("hostgroup.get") => json!([
            {"groupid": "2", "name": "Linux servers"},
            {"groupid": "4", "name": "Zabbix servers"},
            {"groupid": "7", "name": "Databases"}
        ]),
        Some("host.get") => match params["groupids"].as_str() {
            Some("2") => json!([
                {"hostid": "10084", "name": "web1.example.com"},
                {"hostid": "10085", "name": "db1.example.com"}
            ]),
            Some("4") => json!([{"hostid": "10001", "name": "zabbix.example.com"}]),
            Some("7") => json!([
                {"hostid": "10085", "name": "db1.example.com"},
                {"hostid": "10086", "name": "db2.example.com"}
            ]),
            _ => json!([]),
        },
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": "Method not found.", "data": ""},
                "id": id
            });
        }
    };
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}
