//! HTML overlay wiring: loader, header nav highlight, and the per-section
//! content boxes. Element handles are resolved once at startup and held
//! directly, so nothing here queries the DOM by selector per frame.

use reef_core::content::ContentStore;
use reef_core::sections::SECTIONS;
use web_sys as web;

/// Handles to one section's content box.
pub struct SectionBox {
    pub root: web::Element,
    pub title: Option<web::Element>,
    pub description: Option<web::Element>,
    pub list: Option<web::Element>,
}

pub struct Overlay {
    loader: Option<web::Element>,
    nav_links: Vec<Option<web::Element>>,
    boxes: Vec<Option<SectionBox>>,
}

impl Overlay {
    /// Resolve every handle up front. Missing elements are tolerated; the
    /// scene runs fine on a page without the full overlay markup.
    pub fn resolve(document: &web::Document) -> Overlay {
        let loader = document.get_element_by_id("loader");
        let nav_links = SECTIONS
            .iter()
            .map(|s| document.get_element_by_id(&format!("nav-{}", s.id)))
            .collect();
        let boxes = SECTIONS
            .iter()
            .map(|s| {
                document
                    .get_element_by_id(&format!("content-{}", s.id))
                    .map(|root| SectionBox {
                        title: document.get_element_by_id(&format!("content-{}-title", s.id)),
                        description: document.get_element_by_id(&format!("content-{}-desc", s.id)),
                        list: document.get_element_by_id(&format!("content-{}-list", s.id)),
                        root,
                    })
            })
            .collect();
        Overlay {
            loader,
            nav_links,
            boxes,
        }
    }

    /// Fill the content boxes from the fetched payload. Sections with no
    /// entry are left empty.
    pub fn apply_content(&self, document: &web::Document, store: &ContentStore) {
        for (section, slot) in SECTIONS.iter().zip(&self.boxes) {
            let Some(b) = slot else { continue };
            let Some(content) = store.get(section.id) else {
                continue;
            };
            if let Some(el) = &b.title {
                el.set_text_content(Some(&content.title));
            }
            if let Some(el) = &b.description {
                el.set_text_content(Some(&content.description));
            }
            if let Some(el) = &b.list {
                // rebuild the list items under the held handle
                el.set_inner_html("");
                for item in &content.list {
                    if let Ok(li) = document.create_element("li") {
                        li.set_text_content(Some(item));
                        let _ = el.append_child(&li);
                    }
                }
            }
        }
    }

    /// Show exactly one active section box and highlight its nav link.
    pub fn set_active_section(&self, active: usize) {
        for (i, slot) in self.boxes.iter().enumerate() {
            if let Some(b) = slot {
                let cl = b.root.class_list();
                if i == active {
                    let _ = cl.add_1("active");
                } else {
                    let _ = cl.remove_1("active");
                }
            }
        }
        for (i, link) in self.nav_links.iter().enumerate() {
            if let Some(el) = link {
                let cl = el.class_list();
                if i == active {
                    let _ = cl.add_1("active");
                } else {
                    let _ = cl.remove_1("active");
                }
            }
        }
    }

    /// Start the loader fade; CSS owns the transition timing.
    pub fn begin_loader_fade(&self) {
        if let Some(el) = &self.loader {
            let _ = el.class_list().add_1("fade-out");
        }
    }

    /// Remove the loader from flow once the fade has finished.
    pub fn dismiss_loader(&self) {
        if let Some(el) = &self.loader {
            let _ = el.set_attribute("style", "display:none");
        }
    }
}
