pub const DEFAULT_PHOTO: &str = "/static/default-profile.png";
pub const DEFAULT_PHOTO_FILENAME: &str = "default-profile.png";

const ABSOLUTE_SCHEMES: [&str; 4] = ["http", "https", "data", "blob"];

/// Turns the stored `photo_url` value into something an `<img>` can load.
#[derive(Debug, Clone)]
pub struct PhotoResolver {
    base_url: String,
}

impl PhotoResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(&self, photo: Option<&str>) -> String {
        let photo = match photo.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => p,
            None => return DEFAULT_PHOTO.to_string(),
        };

        if is_absolute(photo) {
            return photo.to_string();
        }
        if photo == DEFAULT_PHOTO_FILENAME || photo == DEFAULT_PHOTO {
            return DEFAULT_PHOTO.to_string();
        }
        if photo.starts_with('/') {
            return match url::Url::parse(&self.base_url).and_then(|base| base.join(photo)) {
                Ok(joined) => joined.to_string(),
                Err(_) => photo.to_string(),
            };
        }
        format!("{}/uploads/{}", self.base_url, photo)
    }
}

fn is_absolute(photo: &str) -> bool {
    url::Url::parse(photo)
        .map(|u| ABSOLUTE_SCHEMES.contains(&u.scheme()))
        .unwrap_or(false)
}
