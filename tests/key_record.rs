pub mod common;

use common::{count, severities, ED25519_RAW, ED25519_SPKI, RSA1024_SPKI, RSA2048_SPKI, RSA4608_SPKI, RSA512_SPKI};
use dkimlint::{record::KEY_TAGS, Config, DkimKey, Message, ParseErrorKind, Severity};

#[test]
fn version_tag() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; p={RSA2048_SPKI}"));
    assert_eq!(count(&key.v, Severity::Danger), 0);

    let key = DkimKey::new(&format!("p={RSA2048_SPKI}; v=DKIM1"));
    assert_eq!(count(&key.v, Severity::Danger), 1);

    let key = DkimKey::new(&format!("p={RSA2048_SPKI}"));
    assert_eq!(severities(&key.v), [Severity::Warning]);

    for v in ["DKIM2", "1", "dkim1", ""] {
        let key = DkimKey::new(&format!("v={v}; p={RSA2048_SPKI}"));
        assert_eq!(count(&key.v, Severity::Danger), 1, "v={v}");
    }
}

#[test]
fn granularity_tag() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; g=*; p={RSA2048_SPKI}"));
    assert_eq!(severities(&key.g), [Severity::Warning]);

    let key = DkimKey::new(&format!("v=DKIM1; g=anything-else; p={RSA2048_SPKI}"));
    assert_eq!(severities(&key.g), [Severity::Danger]);

    let key = DkimKey::new(&format!("v=DKIM1; p={RSA2048_SPKI}"));
    assert!(key.g.annotations().is_empty());
}

#[test]
fn hash_tag() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; h=sha256:sha1; p={RSA2048_SPKI}"));

    let annotations = key.h.annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].severity, Severity::Warning);
    assert!(annotations[0].message.as_str().contains("SHA1"));

    let key = DkimKey::new(&format!("v=DKIM1; h=sha256:sha512; p={RSA2048_SPKI}"));
    let annotations = key.h.annotations();
    assert_eq!(annotations.len(), 1);
    assert!(annotations[0].message.as_str().contains("'sha512'"));

    let key = DkimKey::new(&format!("v=DKIM1; h=sha256; p={RSA2048_SPKI}"));
    assert!(key.h.annotations().is_empty());
    assert!(key.is_ok());
}

#[test]
fn rsa_key_sizes() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; k=rsa; p={RSA2048_SPKI}"));
    assert!(key.p.annotations().is_empty());
    assert_eq!(key.worst_severity(), None);

    let key = DkimKey::new(&format!("v=DKIM1; k=rsa; p={RSA1024_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Warning]);
    assert!(key.p.annotations()[0].message.as_str().contains("1024 bit"));

    let key = DkimKey::new(&format!("v=DKIM1; k=rsa; p={RSA4608_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Warning]);
    assert!(key.p.annotations()[0].message.as_str().contains("4608 bit"));
}

#[cfg(not(feature = "pre-rfc8301"))]
#[test]
fn rsa_key_too_short() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; p={RSA512_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Danger]);
    assert!(!key.is_ok());
}

#[cfg(feature = "pre-rfc8301")]
#[test]
fn rsa_key_short_pre_rfc8301() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; p={RSA512_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Warning]);
}

#[test]
fn rsa_key_size_config() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config {
        min_key_bits: 2048,
        recommended_key_bits: 4096,
        ..Default::default()
    };

    let key = DkimKey::with_config(&format!("v=DKIM1; p={RSA1024_SPKI}"), &config);
    assert_eq!(severities(&key.p), [Severity::Danger]);

    let key = DkimKey::with_config(&format!("v=DKIM1; p={RSA2048_SPKI}"), &config);
    assert_eq!(severities(&key.p), [Severity::Warning]);
}

#[test]
fn rsa_key_in_rsapublickey_format() {
    let _ = tracing_subscriber::fmt::try_init();

    // strip the 24-byte SubjectPublicKeyInfo header
    let key = DkimKey::new(&format!("v=DKIM1; p={}", &RSA2048_SPKI[32..]));
    assert_eq!(severities(&key.p), [Severity::Info]);
    assert!(key.is_ok());
}

#[test]
fn ed25519_keys() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; k=ed25519; p={ED25519_RAW}"));
    assert!(key.k.annotations().is_empty());
    assert!(key.p.annotations().is_empty());

    let key = DkimKey::new(&format!("v=DKIM1; k=ed25519; p={ED25519_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Warning]);

    let key = DkimKey::new(&format!("v=DKIM1; k=ed25519; p={RSA2048_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Danger]);
    assert_eq!(
        key.p.annotations()[0].message,
        Message::Markup("This is rsa key data, but the key type is ed25519".into())
    );
}

#[test]
fn key_type_mismatch() {
    let _ = tracing_subscriber::fmt::try_init();

    // k= defaults to rsa
    let key = DkimKey::new(&format!("v=DKIM1; p={ED25519_SPKI}"));
    assert_eq!(severities(&key.p), [Severity::Danger]);
    assert!(key.p.annotations()[0].message.as_str().contains("ed25519 key data"));

    let key = DkimKey::new(&format!("v=DKIM1; p={ED25519_RAW}"));
    assert_eq!(severities(&key.p), [Severity::Danger]);
}

#[test]
fn revoked_and_missing_keys() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new("v=DKIM1; p=");
    assert_eq!(severities(&key.p), [Severity::Info]);

    let key = DkimKey::new("v=DKIM1; k=rsa");
    assert_eq!(severities(&key.p), [Severity::Danger]);
    assert!(!key.p.defined);
}

#[test]
fn folded_key_data() {
    let _ = tracing_subscriber::fmt::try_init();

    let (head, tail) = RSA2048_SPKI.split_at(100);
    let key = DkimKey::new(&format!("v=DKIM1; p={head}\r\n\t{tail}"));

    assert!(key.p.value.contains("\r\n\t"));
    assert!(key.p.annotations().is_empty());
}

#[test]
fn parse_error_short_circuits() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new("v=DKIM1; =rsa");

    let e = key.parse_error.unwrap();
    assert_eq!(e.kind, ParseErrorKind::ExpectedAlpha);
    assert_eq!(e.position, 9);
    assert_eq!(e.message(), "expecting alpha character in tag");

    assert!(key.v.annotations().is_empty());
    assert!(!key.v.defined);
    assert_eq!(key.worst_severity(), None);
}

#[test]
fn unrecognized_tags() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; x=1; p={RSA2048_SPKI}; a_b=2; V=3"));

    let tags: Vec<_> = key.unrecognized_in_order().iter().map(|f| f.tag.as_str()).collect();
    assert_eq!(tags, ["x", "a_b", "V"]);

    for tag in KEY_TAGS {
        assert!(!key.unrecognized.contains_key(tag));
    }
    for field in key.unrecognized.values() {
        assert_eq!(severities(field), [Severity::Info]);
    }
}

#[test]
fn duplicate_tags() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new(&format!("v=DKIM1; p=; p={RSA2048_SPKI}"));

    assert!(key.p.duplicate);
    assert_eq!(key.p.index, 2);
    assert_eq!(severities(&key.p), [Severity::Danger]);
}

#[test]
fn annotation_html() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new("v=DKIM1; h=<x>; p=");

    let html = key.h.annotations()[0].message.to_html();
    assert_eq!(html, "'&lt;x&gt;' isn't a hash type I recognize");

    let key = DkimKey::new("g=*; p=");
    let html = key.g.annotations()[0].message.to_html();
    assert!(html.contains(r#"<a href="https://www.rfc-editor.org/rfc/rfc6376#appendix-C.2">"#));
}

#[test]
fn non_ascii_notes() {
    let _ = tracing_subscriber::fmt::try_init();

    let key = DkimKey::new("v=DKIM1; n=caf\u{e9}; p=");

    assert_eq!(key.parse_error, None);
    assert_eq!(key.n.value, "caf\u{e9}");
    assert_eq!(severities(&key.n), [Severity::Warning]);
    assert!(key.v.defined && key.p.defined);
    assert!(key.v.annotations().is_empty());
}

#[test]
fn multiply_folded_key_data() {
    let _ = tracing_subscriber::fmt::try_init();

    let (head, tail) = RSA2048_SPKI.split_at(64);
    let key = DkimKey::new(&format!("v=DKIM1; p={head}\r\n \r\n\t{tail}\r\n \r\n ; k=rsa"));

    assert_eq!(key.parse_error, None);
    assert!(key.p.value.ends_with(tail));
    assert!(key.p.annotations().is_empty());
    assert_eq!(key.k.value, "rsa");
}

#[test]
fn custom_rules_after_validation() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut key = DkimKey::new(&format!("v=DKIM1; p={RSA2048_SPKI}; x=site-specific"));
    assert!(key.is_ok());

    if let Some(x) = key.unrecognized.get_mut("x") {
        x.add_error("Tag x= is not allowed at this site");
    }
    key.t.add_info(Message::plain("no flags"));

    assert_eq!(severities(&key.unrecognized["x"]), [Severity::Info, Severity::Danger]);
    assert_eq!(severities(&key.t), [Severity::Info]);
    assert_eq!(key.worst_severity(), Some(Severity::Danger));
    assert!(!key.is_ok());
}
