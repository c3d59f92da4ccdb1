//! Platform-neutral message card.

/// A labeled value shown inside a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A button that opens a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

/// A rich message: title, description, fields, images and one link button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    /// 24-bit RGB color
    pub color: u32,
    pub fields: Vec<CardField>,
    /// Large image under the text
    pub image: Option<String>,
    /// Small image in the corner
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    pub link: Option<LinkButton>,
}

impl Announcement {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            fields: Vec::new(),
            image: None,
            thumbnail: None,
            footer: None,
            link: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(CardField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn image(mut self, url: Option<String>) -> Self {
        self.image = url;
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.link = Some(LinkButton {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    /// Look up a field value by name.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
