#[allow(unused_variables, unused_mut, unreachable_code, clippy::all)]
pub fn find_all_routes(m: &str, p: &str) -> Vec<(&'static str, Vec<(&'static str, String)>)> {
    static R: std::sync::LazyLock<Vec<regex::Regex>> = std::sync::LazyLock::new(|| {
        [
            r"^(?<id>\d+)$",
            r"^get\-(?<file>[^/]+)\.(?<ext>[^/]+)$",
        ]
        .iter()
        .map(|re| regex::Regex::new(re).unwrap())
        .collect()
    });
    let m = m.to_ascii_uppercase();
    let m = m.as_str();
    let p = match p.strip_suffix('/') { Some(t) if !t.is_empty() => t, _ => p };
    let mut out: Vec<(&'static str, Vec<(&'static str, String)>)> = Vec::new();
    let s: Vec<&str> = p.split('/').filter(|x| !x.is_empty()).collect();
    let l = s.len();
    if l > 0 {
        match s[0] {
            "another" => {
                if l > 1 {
                    match s[1] {
                        "path" => {
                            if l == 2 {
                                if m == "GET" {
                                    out.push(("/another/path", Vec::new()));
                                }
                            }
                        }
                        _ => {}
                    }
                }
                if l == 1 {
                }
            }
            "any" => {
                if l == 1 {
                } else {
                    if l == 2 {
                        {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("x", x.to_string())); }
                            out.push(("/any/:x", v));
                        }
                    }
                }
                if l == 1 {
                }
            }
            "assets" => {
                if l == 1 {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("path", s[1.min(l)..].join("/")));
                        out.push(("/assets/:path*", v));
                    }
                } else {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("path", s[1.min(l)..].join("/")));
                        out.push(("/assets/:path*", v));
                    }
                }
                if l == 1 {
                }
            }
            "book" => {
                if l == 1 {
                    if m == "GET" {
                        out.push(("/book{s}?", Vec::new()));
                    }
                }
            }
            "books" => {
                if l == 1 {
                    if m == "GET" {
                        out.push(("/book{s}?", Vec::new()));
                    }
                }
            }
            "files" => {
                if l == 1 {
                } else {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("path", s[1.min(l)..].join("/")));
                        out.push(("/files/:path+", v));
                    }
                }
                if l == 1 {
                }
            }
            "num" => {
                if l == 1 {
                } else {
                    if l == 2 {
                        if m == "GET" && s.get(1).is_some_and(|x| R[0].is_match(x)) {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1).map(|x| x.to_string()) {
                                if let Some(c) = R[0].captures(&x) {
                                    for n in R[0].capture_names().flatten() { if let Some(g) = c.name(n) { v.push((n, g.as_str().to_string())); } }
                                }
                            }
                            out.push(("/num/:id(\\d+)", v));
                        }
                        if m == "GET" {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("slug", x.to_string())); }
                            out.push(("/num/:slug", v));
                        }
                    }
                }
                if l == 1 {
                }
            }
            "test" => {
                if l == 1 {
                } else {
                    if l > 2 {
                        match s[2] {
                            "y" => {
                                if l == 3 {
                                    if m == "GET" {
                                        let mut v: Vec<(&'static str, String)> = Vec::new();
                                        if let Some(x) = s.get(1) { v.push(("idY", x.to_string())); }
                                        out.push(("/test/:idY/y", v));
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    if l == 2 {
                        if m == "GET" {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("id", x.to_string())); }
                            out.push(("/test/:id", v));
                        }
                    }
                }
                if l > 1 {
                    match s[1] {
                        "foo" => {
                            if l == 2 {
                                if m == "GET" {
                                    let mut v: Vec<(&'static str, String)> = Vec::new();
                                    v.push(("_", s[2.min(l)..].join("/")));
                                    out.push(("/test/foo/**", v));
                                }
                            } else {
                                if m == "GET" {
                                    let mut v: Vec<(&'static str, String)> = Vec::new();
                                    v.push(("_", s[2.min(l)..].join("/")));
                                    out.push(("/test/foo/**", v));
                                }
                            }
                            if l == 2 {
                                if m == "GET" {
                                    let mut v: Vec<(&'static str, String)> = Vec::new();
                                    if let Some(x) = s.get(2) { v.push(("_0", x.to_string())); }
                                    out.push(("/test/foo/*", v));
                                }
                            } else {
                                if l == 3 {
                                    if m == "GET" {
                                        let mut v: Vec<(&'static str, String)> = Vec::new();
                                        if let Some(x) = s.get(2) { v.push(("_0", x.to_string())); }
                                        out.push(("/test/foo/*", v));
                                    }
                                }
                            }
                            if l > 2 {
                                match s[2] {
                                    "bar" => {
                                        if l > 3 {
                                            match s[3] {
                                                "qux" => {
                                                    if l == 4 {
                                                        if m == "GET" {
                                                            out.push(("/test/foo/bar/qux", Vec::new()));
                                                        }
                                                    }
                                                }
                                                _ => {}
                                            }
                                        }
                                        if l == 3 {
                                        }
                                    }
                                    _ => {}
                                }
                            }
                            if l == 2 {
                                if m == "GET" {
                                    out.push(("/test/foo", Vec::new()));
                                }
                            }
                        }
                        _ => {}
                    }
                }
                if l == 1 {
                    if m == "GET" {
                        out.push(("/test", Vec::new()));
                    }
                    if m == "POST" {
                        out.push(("POST /test", Vec::new()));
                    }
                }
            }
            "users" => {
                if l == 1 {
                } else {
                    if l == 2 {
                        if m == "GET" {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("id", x.to_string())); }
                            out.push(("/users/:id?", v));
                        }
                    }
                }
                if l == 1 {
                    if m == "GET" {
                        out.push(("/users/:id?", Vec::new()));
                    }
                }
            }
            "wildcard" => {
                if l == 1 {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("_", s[1.min(l)..].join("/")));
                        out.push(("/wildcard/**", v));
                    }
                } else {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("_", s[1.min(l)..].join("/")));
                        out.push(("/wildcard/**", v));
                    }
                }
                if l == 1 {
                }
            }
            "x" => {
                if l == 1 {
                } else {
                    if l == 2 {
                        if m == "GET" && s.get(1).is_some_and(|x| R[1].is_match(x)) {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1).map(|x| x.to_string()) {
                                if let Some(c) = R[1].captures(&x) {
                                    for n in R[1].capture_names().flatten() { if let Some(g) = c.name(n) { v.push((n, g.as_str().to_string())); } }
                                }
                            }
                            out.push(("/x/get-:file.:ext", v));
                        }
                    }
                }
                if l == 1 {
                }
            }
            _ => {}
        }
    }
    if l == 0 {
        if m == "GET" {
            out.push(("/", Vec::new()));
        }
    }
    out
}
