#[allow(unused_variables, unused_mut, unreachable_code, clippy::all)]
pub fn find_route(m: &str, p: &str) -> Option<(&'static str, Vec<(&'static str, String)>)> {
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
    match p {
        "/" => {
            if m == "GET" { return Some(("/", Vec::new())); }
        }
        "/another/path" => {
            if m == "GET" { return Some(("/another/path", Vec::new())); }
        }
        "/book" => {
            if m == "GET" { return Some(("/book{s}?", Vec::new())); }
        }
        "/books" => {
            if m == "GET" { return Some(("/book{s}?", Vec::new())); }
        }
        "/test" => {
            if m == "GET" { return Some(("/test", Vec::new())); }
            if m == "POST" { return Some(("POST /test", Vec::new())); }
        }
        "/test/foo" => {
            if m == "GET" { return Some(("/test/foo", Vec::new())); }
        }
        "/test/foo/bar/qux" => {
            if m == "GET" { return Some(("/test/foo/bar/qux", Vec::new())); }
        }
        "/users" => {
            if m == "GET" { return Some(("/users/:id?", Vec::new())); }
        }
        _ => {}
    }
    let s: Vec<&str> = p.split('/').filter(|x| !x.is_empty()).collect();
    let l = s.len();
    if l == 0 {
        if m == "GET" {
            return Some(("/", Vec::new()));
        }
    } else {
        match s[0] {
            "another" => {
                if l == 1 {
                } else {
                    match s[1] {
                        "path" => {
                            if l == 2 {
                                if m == "GET" {
                                    return Some(("/another/path", Vec::new()));
                                }
                            } else {
                            }
                        }
                        _ => {}
                    }
                }
            }
            "any" => {
                if l == 1 {
                } else {
                    if l == 2 {
                        {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("x", x.to_string())); }
                            return Some(("/any/:x", v));
                        }
                    } else {
                    }
                }
            }
            "assets" => {
                if l == 1 {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("path", s[1.min(l)..].join("/")));
                        return Some(("/assets/:path*", v));
                    }
                } else {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("path", s[1.min(l)..].join("/")));
                        return Some(("/assets/:path*", v));
                    }
                }
            }
            "book" => {
                if l == 1 {
                    if m == "GET" {
                        return Some(("/book{s}?", Vec::new()));
                    }
                } else {
                }
            }
            "books" => {
                if l == 1 {
                    if m == "GET" {
                        return Some(("/book{s}?", Vec::new()));
                    }
                } else {
                }
            }
            "files" => {
                if l == 1 {
                } else {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("path", s[1.min(l)..].join("/")));
                        return Some(("/files/:path+", v));
                    }
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
                            return Some(("/num/:id(\\d+)", v));
                        }
                        if m == "GET" {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("slug", x.to_string())); }
                            return Some(("/num/:slug", v));
                        }
                    } else {
                    }
                }
            }
            "test" => {
                if l == 1 {
                    if m == "GET" {
                        return Some(("/test", Vec::new()));
                    }
                    if m == "POST" {
                        return Some(("POST /test", Vec::new()));
                    }
                } else {
                    match s[1] {
                        "foo" => {
                            if l == 2 {
                                if m == "GET" {
                                    return Some(("/test/foo", Vec::new()));
                                }
                                if m == "GET" {
                                    let mut v: Vec<(&'static str, String)> = Vec::new();
                                    if let Some(x) = s.get(2) { v.push(("_0", x.to_string())); }
                                    return Some(("/test/foo/*", v));
                                }
                                if m == "GET" {
                                    let mut v: Vec<(&'static str, String)> = Vec::new();
                                    v.push(("_", s[2.min(l)..].join("/")));
                                    return Some(("/test/foo/**", v));
                                }
                            } else {
                                match s[2] {
                                    "bar" => {
                                        if l == 3 {
                                        } else {
                                            match s[3] {
                                                "qux" => {
                                                    if l == 4 {
                                                        if m == "GET" {
                                                            return Some(("/test/foo/bar/qux", Vec::new()));
                                                        }
                                                    } else {
                                                    }
                                                }
                                                _ => {}
                                            }
                                        }
                                    }
                                    _ => {}
                                }
                                if l == 3 {
                                    if m == "GET" {
                                        let mut v: Vec<(&'static str, String)> = Vec::new();
                                        if let Some(x) = s.get(2) { v.push(("_0", x.to_string())); }
                                        return Some(("/test/foo/*", v));
                                    }
                                } else {
                                }
                                if m == "GET" {
                                    let mut v: Vec<(&'static str, String)> = Vec::new();
                                    v.push(("_", s[2.min(l)..].join("/")));
                                    return Some(("/test/foo/**", v));
                                }
                            }
                        }
                        _ => {}
                    }
                    if l == 2 {
                        if m == "GET" {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("id", x.to_string())); }
                            return Some(("/test/:id", v));
                        }
                    } else {
                        match s[2] {
                            "y" => {
                                if l == 3 {
                                    if m == "GET" {
                                        let mut v: Vec<(&'static str, String)> = Vec::new();
                                        if let Some(x) = s.get(1) { v.push(("idY", x.to_string())); }
                                        return Some(("/test/:idY/y", v));
                                    }
                                } else {
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
            "users" => {
                if l == 1 {
                    if m == "GET" {
                        return Some(("/users/:id?", Vec::new()));
                    }
                } else {
                    if l == 2 {
                        if m == "GET" {
                            let mut v: Vec<(&'static str, String)> = Vec::new();
                            if let Some(x) = s.get(1) { v.push(("id", x.to_string())); }
                            return Some(("/users/:id?", v));
                        }
                    } else {
                    }
                }
            }
            "wildcard" => {
                if l == 1 {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("_", s[1.min(l)..].join("/")));
                        return Some(("/wildcard/**", v));
                    }
                } else {
                    if m == "GET" {
                        let mut v: Vec<(&'static str, String)> = Vec::new();
                        v.push(("_", s[1.min(l)..].join("/")));
                        return Some(("/wildcard/**", v));
                    }
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
                            return Some(("/x/get-:file.:ext", v));
                        }
                    } else {
                    }
                }
            }
            _ => {}
        }
    }
    None
}
