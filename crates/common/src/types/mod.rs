use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Document served at `/` so clients can discover the docs location.
#[derive(Serialize, Debug)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
    pub status: &'static str,
}

impl ServiceInfo {
    pub fn running(name: &'static str, version: &'static str) -> Self {
        Self { name, version, docs: "/docs", status: "running" }
    }
}
