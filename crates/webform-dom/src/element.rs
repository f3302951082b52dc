//! Mutable element tree with HTML output.
//!
//! Attributes render in insertion order. Boolean attributes (`required`,
//! `disabled`, `checked`, `selected`) are modeled as flags so they render
//! bare, without a value.

use std::fmt::Write;

/// Tags rendered as void elements (`<input ... />`).
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "link", "meta"];

/// One node of rendered form markup.
///
/// # Examples
///
/// ```
/// use webform_dom::Element;
///
/// let mut input = Element::new("input");
/// input.set_attr("type", "text");
/// input.set_attr("name", "username");
/// input.set_flag("required");
///
/// assert_eq!(input.render(), r#"<input type="text" name="username" required />"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	tag: String,
	attrs: Vec<(String, String)>,
	flags: Vec<String>,
	classes: Vec<String>,
	style: Vec<(String, String)>,
	text: Option<String>,
	children: Vec<Element>,
}

impl Element {
	/// Create an empty element with the given tag.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: vec![],
			flags: vec![],
			classes: vec![],
			style: vec![],
			text: None,
			children: vec![],
		}
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Set an attribute, replacing any previous value.
	pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.attrs.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.attrs.push((name, value)),
		}
	}

	/// Builder form of [`set_attr`](Self::set_attr).
	pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_attr(name, value);
		self
	}

	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Remove an attribute. Returns whether it was present.
	pub fn remove_attr(&mut self, name: &str) -> bool {
		let before = self.attrs.len();
		self.attrs.retain(|(n, _)| n != name);
		self.attrs.len() != before
	}

	/// Set a boolean attribute (`required`, `disabled`, ...).
	pub fn set_flag(&mut self, name: impl Into<String>) {
		let name = name.into();
		if !self.flags.contains(&name) {
			self.flags.push(name);
		}
	}

	pub fn clear_flag(&mut self, name: &str) {
		self.flags.retain(|f| f != name);
	}

	pub fn has_flag(&self, name: &str) -> bool {
		self.flags.iter().any(|f| f == name)
	}

	pub fn add_class(&mut self, class: impl Into<String>) {
		let class = class.into();
		if !self.classes.contains(&class) {
			self.classes.push(class);
		}
	}

	/// Builder form of [`add_class`](Self::add_class).
	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.add_class(class);
		self
	}

	pub fn remove_class(&mut self, class: &str) {
		self.classes.retain(|c| c != class);
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.classes.iter().any(|c| c == class)
	}

	/// Set an inline style property, replacing any previous value.
	pub fn set_style(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.style.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.style.push((name, value)),
		}
	}

	pub fn set_text(&mut self, text: impl Into<String>) {
		self.text = Some(text.into());
	}

	/// Builder form of [`set_text`](Self::set_text).
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.set_text(text);
		self
	}

	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	pub fn append_child(&mut self, child: Element) {
		self.children.push(child);
	}

	/// Builder form of [`append_child`](Self::append_child).
	pub fn with_child(mut self, child: Element) -> Self {
		self.append_child(child);
		self
	}

	pub fn children(&self) -> &[Element] {
		&self.children
	}

	pub fn children_mut(&mut self) -> &mut [Element] {
		&mut self.children
	}

	/// Depth-first search over this element and its descendants.
	///
	/// # Examples
	///
	/// ```
	/// use webform_dom::Element;
	///
	/// let form = Element::new("form")
	/// 	.with_child(Element::new("fieldset").with_child(
	/// 		Element::new("input").with_attr("name", "email"),
	/// 	));
	///
	/// let input = form.find(&|e| e.attr("name") == Some("email")).unwrap();
	/// assert_eq!(input.tag(), "input");
	/// ```
	pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
		if pred(self) {
			return Some(self);
		}
		self.children.iter().find_map(|c| c.find(pred))
	}

	/// Depth-first search returning every match.
	pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
		let mut out = vec![];
		self.collect(pred, &mut out);
		out
	}

	fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
		if pred(self) {
			out.push(self);
		}
		for child in &self.children {
			child.collect(pred, out);
		}
	}

	pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
		self.find_all(&|e| e.tag == tag)
	}

	pub fn find_by_class(&self, class: &str) -> Option<&Element> {
		self.find(&|e| e.has_class(class))
	}

	pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Element> {
		self.find(&|e| e.attr(name) == Some(value))
	}

	/// Render this element and its subtree as HTML.
	pub fn render(&self) -> String {
		let mut html = String::new();
		self.write(&mut html);
		html
	}

	fn write(&self, html: &mut String) {
		let _ = write!(html, "<{}", self.tag);

		for (name, value) in &self.attrs {
			let _ = write!(html, r#" {}="{}""#, name, html_escape(value));
		}
		for flag in &self.flags {
			let _ = write!(html, " {}", flag);
		}
		if !self.classes.is_empty() {
			let _ = write!(html, r#" class="{}""#, html_escape(&self.classes.join(" ")));
		}
		if !self.style.is_empty() {
			let css: Vec<String> = self
				.style
				.iter()
				.map(|(n, v)| format!("{}: {}", n, v))
				.collect();
			let _ = write!(html, r#" style="{}""#, html_escape(&css.join("; ")));
		}

		if VOID_TAGS.contains(&self.tag.as_str()) {
			html.push_str(" />");
			return;
		}

		html.push('>');
		if let Some(text) = &self.text {
			html.push_str(&html_escape(text));
		}
		for child in &self.children {
			child.write(html);
		}
		let _ = write!(html, "</{}>", self.tag);
	}
}

/// HTML escape utility.
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}
