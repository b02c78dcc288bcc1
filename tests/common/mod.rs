use dkimlint::{Field, Severity};

// RFC 6376, appendix C
pub const RSA1024_SPKI: &str = "MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQDwIRP/UC3SBsEmGqZ9ZJW3/DkMoGeLnQg1fWn7/zYtIxN2SnFCjxOCKG9v3b4jYfcTNh5ijSsq631uBItLa7od+v/RtdC2UzJ1lWT947qR+Rcac2gbto/NMqJ0fzfVjH4OuKhitdY9tf6mcwGjaNBcWToIMmPSPDdQPNUYckcQ2QIDAQAB";

pub const RSA512_SPKI: &str = "MFwwDQYJKoZIhvcNAQEBBQADSwAwSAJBAMHvVovq5nzeowZMzrfMhzWs59Db7FBx4seHSJ/XT8y+xzm8TdaKWb3KwUHuMTCXHbUiw+XlGJJKmi4p11Qit8MCAwEAAQ==";

pub const RSA2048_SPKI: &str = "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAvXEn6j24wx68Zs5djoKQLFXcGUUPzvAAfrc9RKzBQG+dglfdCqZy2ZFai4SlLivvkkCU+0wXl+ExSSY5xEiQk7m3YQZbeIAeSWUTLe7asTri73c7nX5D7+1KKWUarMHKLeWN5F9Re8uOfWrgZdYC20bfoptbMQLLPcbfchP9Z7epZRwdi6xeZySFO2JnwyK2kEay7VpF7YivwQzMohF2hlQ9OshDIa2w7uudKp5jAcOVymPTi3iu6tEI/3NNkcezukVawN6bLkZf6IEE3Gap2oD3pidf51iAfb7BBbeE36Hl3dPxAgfsSrc/v2HTRMYeeBb7fjFC50ImvxjtmFUIxQIDAQAB";

pub const RSA4608_SPKI: &str = "MIICYjANBgkqhkiG9w0BAQEFAAOCAk8AMIICSgKCAkEA/rcHvTmiU4ZVAnjbv0DySEpfEeKvHHgbMFJ+0nzCwpomBDMpwASDQmDK+3KItwuje9yA1vvQgQPPiNnaRqCczZUtUifN4PMOh7u0vEqIbMekpRKjemRQZN8mfXVKgMvZ+0r4bj4JxxmLPSoAWdYSOUVYugtpljhC81OTpjYRit8YEmzm9cyiovfHvC4sjfD1W8yRzoYWPGEIdOP1rdy1Z+t/2DSk+n8R0AB40+X3WAGcYPgfxNr2VztE9XYhZmx53K0dZZgXjbOfljsDfHhQ5l/kTEuB1Da6NeMixuUUc3169DHDQ8HW35WeX02KSBPSuDMKZHOZyXwaF/rzGf2jkbbSKyPqzGCuIGG+I/muf/XTPEkR6sO+VZsP6540TQR5rhFxCCpn8badR8DsE+707ySSrutpuoXH72x87NjHAhEgZgzYsI6BeqAY6TocIEnwuNCkBn0SUp0jG3tF+rrEaeq23rcIoBUwixaZsGVMweJYdm1iLunCDXTw+YhfX9gF2w/WF9jqkFbK5YWXkZj/7hwy9GZFzui4ROFJigPWbnh7BN7Ga3oektwCRCWuYBphArTgCfgao5BnY8AWsJjJRFOnN6EX0Hi1Ir9ujUrP1JP0K0MFB+HcGEsg8f93VMJoQS0rcdnO0NLp/BJ9ljHe4vKTeCsmch+rL4sMFFkeSl0cFLITi7KbRBkq/oUuZGtIzvMhGZiLiiknw/afwv0Q7sCOVu+715Te298JFIo6afndaZahcvdAJed8re6OlE2fAgMBAAE=";

// RFC 8463, appendix A.2
pub const ED25519_RAW: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";

pub const ED25519_SPKI: &str = "MCowBQYDK2VwAyEARoLyjTRYOF75hfGb6xFS1aZi14mag2QMucXfcQEn+zU=";

pub fn severities(field: &Field) -> Vec<Severity> {
    field.annotations().iter().map(|a| a.severity).collect()
}

pub fn count(field: &Field, severity: Severity) -> usize {
    field.annotations().iter().filter(|a| a.severity == severity).count()
}
