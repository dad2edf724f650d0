//! Query string parsing helpers.

use salvo::oapi::extract::QueryParam;

use openconnect_app::validation::FieldErrors;

pub(crate) trait QueryParamExt {
    /// The raw value, or `default` when absent.
    fn or_default_str(self, default: &str) -> String;

    /// A comma-separated list; absent or empty gives no items.
    fn into_csv(self) -> Vec<String>;

    /// A non-negative integer, or `default` when absent.
    ///
    /// An unparseable value is recorded against `key` and yields `default`.
    fn into_u32(self, key: &str, default: u32, errors: &mut FieldErrors) -> u32;
}

impl QueryParamExt for QueryParam<String, false> {
    fn or_default_str(self, default: &str) -> String {
        self.into_inner().unwrap_or_else(|| default.to_string())
    }

    fn into_csv(self) -> Vec<String> {
        self.into_inner()
            .filter(|value| !value.is_empty())
            .map(|value| value.split(',').map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    fn into_u32(self, key: &str, default: u32, errors: &mut FieldErrors) -> u32 {
        let Some(value) = self.into_inner() else {
            return default;
        };

        // Out-of-range integers are clamped so the range checks report them.
        match value.parse::<i64>() {
            Ok(parsed) => u32::try_from(parsed.max(0)).unwrap_or(u32::MAX),
            Err(_ignored) => {
                errors.add(key, "must be an integer value");

                default
            }
        }
    }
}
