//! The landing page: hero, the four card grids, shop teaser and newsletter.

use crate::browser::observer::IntersectionBatch;
use crate::browser::Host;
use crate::catalog::{BlogPost, Catalog, Category, Content, Feature, Product};
use crate::components::reveal::render_revealed;
use crate::components::signup::{SignupNodes, TeaserNodes};
use crate::components::{
    GridKind, NewsletterSection, PatchQueue, RevealController, SectionGrid, ShopTeaser, ToggleSet,
};
use crate::config::SiteConfig;
use crate::css::scalar::Scalar;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::action::UiAction;
use crate::geometry::Spacing;
use crate::layout::style::BoxStyle;
use crate::reactive::{dispose_effect, EffectId};

/// Class on a liked product's heart button.
pub const LIKED: &str = "liked";
/// Class on a saved blog post's bookmark button.
pub const SAVED: &str = "saved";

const HERO_STATS: [(&str, &str); 3] =
    [("500+", "Produkte"), ("200+", "Ratgeber"), ("50K+", "Happy Pets")];

/// The mounted landing page.
#[derive(Debug)]
pub struct LandingPage {
    root: NodeId,
    hero: RevealController,
    hero_render: Option<EffectId>,
    grids: Vec<SectionGrid>,
    teaser: ShopTeaser,
    newsletter: NewsletterSection,
    likes: ToggleSet<String>,
    saves: ToggleSet<u32>,
}

impl LandingPage {
    /// Build the page under `main` and start observing its cards.
    pub fn mount(
        host: &mut Host,
        main: NodeId,
        catalog: &Catalog,
        content: &Content,
        config: &SiteConfig,
        patches: &PatchQueue,
    ) -> Self {
        let root = host.dom.insert_child(
            main,
            NodeData::new("div").with_class("landing").with_style(BoxStyle::column()),
        );

        let hero_node = build_hero(&mut host.dom, root);
        let mut hero = RevealController::unobserved();
        hero.register(&mut host.observers, hero_node);
        let hero_render = render_revealed(&hero, vec![hero_node], patches);
        hero.reveal(0);

        let dom = &mut host.dom;
        let features = build_grid(dom, root, GridKind::Features, &content.features, feature_card);
        let categories =
            build_grid(dom, root, GridKind::Categories, &content.categories, category_card);
        let blog = build_grid(dom, root, GridKind::Blog, &content.blog_posts, blog_card);
        let products =
            build_grid(dom, root, GridKind::Products, catalog.products(), product_card);

        let mut likes = ToggleSet::new();
        likes.bind(like_buttons(&host.dom, &products, catalog.products()), LIKED, patches);
        let mut saves = ToggleSet::new();
        saves.bind(save_buttons(&host.dom, &blog, &content.blog_posts), SAVED, patches);

        let grids = [
            (GridKind::Features, features, config.feature_reveal.clone()),
            (GridKind::Categories, categories, config.card_reveal.clone()),
            (GridKind::Blog, blog, config.card_reveal.clone()),
            (GridKind::Products, products, config.card_reveal.clone()),
        ]
        .into_iter()
        .map(|(kind, cards, options)| SectionGrid::mount(host, kind, cards, options, patches))
        .collect();

        let teaser_nodes = build_teaser(&mut host.dom, root);
        let teaser = ShopTeaser::mount(host, teaser_nodes, config.section_reveal.clone(), patches);
        let signup_nodes = build_signup(&mut host.dom, root);
        let newsletter = NewsletterSection::mount(
            host,
            signup_nodes,
            config.section_reveal.clone(),
            config.newsletter_submit_delay(),
            patches,
        );

        tracing::debug!(
            products = catalog.len(),
            posts = content.blog_posts.len(),
            "landing page mounted"
        );
        Self {
            root,
            hero,
            hero_render: Some(hero_render),
            grids,
            teaser,
            newsletter,
            likes,
            saves,
        }
    }

    /// Route an intersection delivery to the component that owns it.
    pub fn handle_batch(&self, batch: &IntersectionBatch) -> usize {
        if let Some(grid) = self.grids.iter().find(|g| g.reveal().owns(batch)) {
            return grid.handle_batch(batch);
        }
        if self.teaser.reveal().owns(batch) {
            return self.teaser.handle_batch(batch);
        }
        self.newsletter.handle_batch(batch)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn hero(&self) -> &RevealController {
        &self.hero
    }

    pub fn grid(&self, kind: GridKind) -> Option<&SectionGrid> {
        self.grids.iter().find(|g| g.kind() == kind)
    }

    pub fn grids(&self) -> &[SectionGrid] {
        &self.grids
    }

    pub fn teaser(&self) -> &ShopTeaser {
        &self.teaser
    }

    pub fn newsletter(&self) -> &NewsletterSection {
        &self.newsletter
    }

    pub fn newsletter_mut(&mut self) -> &mut NewsletterSection {
        &mut self.newsletter
    }

    pub fn likes(&self) -> &ToggleSet<String> {
        &self.likes
    }

    pub fn saves(&self) -> &ToggleSet<u32> {
        &self.saves
    }

    /// Release observers, timers and effects, then drop the page's nodes.
    pub fn teardown(&mut self, host: &mut Host) {
        if let Some(render) = self.hero_render.take() {
            dispose_effect(render);
        }
        for grid in &mut self.grids {
            grid.teardown(host);
        }
        self.teaser.teardown(host);
        self.newsletter.teardown(host);
        self.likes.teardown();
        self.saves.teardown();
        host.dom.remove(self.root);
        tracing::debug!("landing page unmounted");
    }
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

fn section_style() -> BoxStyle {
    BoxStyle::column()
        .with_padding(Spacing::new(80, 32, 80, 32))
        .with_gap(32)
}

fn heading(dom: &mut Dom, parent: NodeId, tag: &str, text: &str, height: f32) -> NodeId {
    dom.insert_child(
        parent,
        NodeData::new(tag)
            .with_text(text)
            .with_style(BoxStyle::column().with_height(Scalar::px(height))),
    )
}

fn build_hero(dom: &mut Dom, root: NodeId) -> NodeId {
    let hero = dom.insert_child(
        root,
        NodeData::new("section")
            .with_id("hero")
            .with_style(section_style().with_height(Scalar::px(800.0))),
    );
    heading(dom, hero, "h1", "Willkommen in der HaustierOase", 120.0);
    dom.insert_child(hero, NodeData::new("p").with_text("Dein Ort für tierische Empfehlungen"));
    dom.insert_child(
        hero,
        NodeData::new("button").with_text("Jetzt entdecken").focusable(true),
    );
    dom.insert_child(
        hero,
        NodeData::new("button").with_text("Mehr erfahren").focusable(true),
    );
    for (value, label) in HERO_STATS {
        let stat = dom.insert_child(hero, NodeData::new("div").with_class("stat"));
        dom.insert_child(stat, NodeData::new("strong").with_text(value));
        dom.insert_child(stat, NodeData::new("span").with_text(label));
    }
    hero
}

fn grid_title(kind: GridKind) -> &'static str {
    match kind {
        GridKind::Features => "Warum HaustierOase?",
        GridKind::Categories => "Unsere Kategorien",
        GridKind::Blog => "Aktuelle Ratgeber",
        GridKind::Products => "Beliebte Produkte",
    }
}

fn card_style(kind: GridKind) -> BoxStyle {
    let (width, height) = match kind {
        GridKind::Features => (25.0, 240.0),
        GridKind::Categories => (50.0, 320.0),
        GridKind::Blog | GridKind::Products => (50.0, 420.0),
    };
    BoxStyle::column()
        .with_width(Scalar::percent(width))
        .with_height(Scalar::px(height))
        .with_padding(Spacing::all(16))
}

/// Card `index` animates in after `index × 100ms`.
pub fn transition_delay(index: usize) -> String {
    format!("{}ms", index * 100)
}

fn build_grid<T>(
    dom: &mut Dom,
    root: NodeId,
    kind: GridKind,
    items: &[T],
    card: fn(&mut Dom, NodeId, &T),
) -> Vec<NodeId> {
    let mut section = NodeData::new("section")
        .with_class(kind.to_string())
        .with_style(section_style());
    if let Some(anchor) = kind.anchor() {
        section = section.with_id(anchor);
    }
    let section = dom.insert_child(root, section);
    heading(dom, section, "h2", grid_title(kind), 48.0);
    let row = dom.insert_child(section, NodeData::new("div").with_style(BoxStyle::wrapping_row()));

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let node = dom.insert_child(
                row,
                NodeData::new(if kind == GridKind::Blog { "article" } else { "div" })
                    .with_class("card")
                    .with_attr("transition-delay", transition_delay(index))
                    .with_style(card_style(kind)),
            );
            card(dom, node, item);
            node
        })
        .collect()
}

fn feature_card(dom: &mut Dom, card: NodeId, feature: &Feature) {
    dom.insert_child(card, NodeData::new("h3").with_text(&feature.title));
    dom.insert_child(card, NodeData::new("p").with_text(&feature.description));
}

fn category_card(dom: &mut Dom, card: NodeId, category: &Category) {
    dom.insert_child(
        card,
        NodeData::new("img")
            .with_attr("src", &category.image)
            .with_attr("alt", &category.name),
    );
    dom.insert_child(card, NodeData::new("h3").with_text(&category.name));
    dom.insert_child(card, NodeData::new("p").with_text(&category.description));
    dom.insert_child(card, NodeData::new("span").with_class("count").with_text(&category.count));
}

fn blog_card(dom: &mut Dom, card: NodeId, post: &BlogPost) {
    dom.insert_child(
        card,
        NodeData::new("img").with_attr("src", &post.image).with_attr("alt", &post.title),
    );
    dom.insert_child(card, NodeData::new("span").with_class("category").with_text(&post.category));
    dom.insert_child(
        card,
        NodeData::new("button")
            .with_class("save")
            .with_attr("aria-label", "Artikel speichern")
            .with_action(UiAction::ToggleSave(post.id))
            .focusable(true),
    );
    dom.insert_child(card, NodeData::new("h3").with_text(&post.title));
    dom.insert_child(card, NodeData::new("p").with_text(&post.excerpt));
    dom.insert_child(
        card,
        NodeData::new("span")
            .with_class("meta")
            .with_text(format!("{} · {} · {}", post.author, post.date, post.read_time)),
    );
}

fn product_card(dom: &mut Dom, card: NodeId, product: &Product) {
    dom.insert_child(
        card,
        NodeData::new("img").with_attr("src", &product.image).with_attr("alt", &product.name),
    );
    dom.insert_child(
        card,
        NodeData::new("span")
            .with_class("badge")
            .with_attr("data-color", &product.badge_color)
            .with_text(&product.badge),
    );
    if let Some(savings) = product.savings_percent() {
        dom.insert_child(
            card,
            NodeData::new("span").with_class("savings").with_text(format!("-{savings}%")),
        );
    }
    dom.insert_child(
        card,
        NodeData::new("button")
            .with_class("like")
            .with_attr("aria-label", "Produkt merken")
            .with_action(UiAction::ToggleLike(product.id.clone()))
            .focusable(true),
    );
    dom.insert_child(card, NodeData::new("h3").with_text(&product.name));
    dom.insert_child(card, NodeData::new("p").with_text(&product.description));
    let stars = product.full_stars() as usize;
    dom.insert_child(
        card,
        NodeData::new("span")
            .with_class("rating")
            .with_text(format!(
                "{}{} ({})",
                "★".repeat(stars),
                "☆".repeat(5 - stars),
                product.reviews
            )),
    );
    dom.insert_child(card, NodeData::new("span").with_class("price").with_text(&product.price));
    dom.insert_child(
        card,
        NodeData::new("s").with_class("old-price").with_text(&product.old_price),
    );
    let path = product.detail_path();
    dom.insert_child(
        card,
        NodeData::new("a")
            .with_text("Details")
            .with_attr("href", &path)
            .with_action(UiAction::Link(path))
            .focusable(true),
    );
    dom.insert_child(
        card,
        NodeData::new("a")
            .with_class("buy")
            .with_text("Jetzt kaufen")
            .with_attr("href", &product.affiliate_link)
            .with_action(UiAction::External(product.affiliate_link.clone()))
            .focusable(true),
    );
}

fn child_with_class(dom: &Dom, card: NodeId, class: &str) -> Option<NodeId> {
    dom.children(card)
        .iter()
        .copied()
        .find(|&n| dom.get(n).is_some_and(|d| d.has_class(class)))
}

fn like_buttons(dom: &Dom, cards: &[NodeId], products: &[Product]) -> Vec<(String, NodeId)> {
    cards
        .iter()
        .zip(products)
        .filter_map(|(&card, product)| {
            Some((product.id.clone(), child_with_class(dom, card, "like")?))
        })
        .collect()
}

fn save_buttons(dom: &Dom, cards: &[NodeId], posts: &[BlogPost]) -> Vec<(u32, NodeId)> {
    cards
        .iter()
        .zip(posts)
        .filter_map(|(&card, post)| Some((post.id, child_with_class(dom, card, "save")?)))
        .collect()
}

fn build_teaser(dom: &mut Dom, root: NodeId) -> TeaserNodes {
    let section = dom.insert_child(
        root,
        NodeData::new("section").with_class("shop-teaser").with_style(section_style()),
    );
    let panel = dom.insert_child(
        section,
        NodeData::new("div")
            .with_class("panel")
            .with_style(BoxStyle::column().with_height(Scalar::px(400.0))),
    );
    heading(dom, panel, "h2", "Shop kommt!", 48.0);
    let form = dom.insert_child(panel, NodeData::new("form").with_style(BoxStyle::wrapping_row()));
    let input = dom.insert_child(
        form,
        NodeData::new("input")
            .with_attr("type", "email")
            .with_attr("placeholder", "E-Mail für Benachrichtigung")
            .with_value(""),
    );
    let button = dom.insert_child(
        form,
        NodeData::new("button")
            .with_attr("type", "submit")
            .with_attr("aria-label", "Benachrichtigen")
            .with_action(UiAction::SubmitNotify)
            .focusable(true),
    );
    let confirmation = dom.insert_child(
        panel,
        NodeData::new("div")
            .with_class("confirmation")
            .with_text("Wir benachrichtigen dich!")
            .with_style(BoxStyle {
                hidden: true,
                ..BoxStyle::column()
            }),
    );
    TeaserNodes {
        section,
        panel,
        form,
        input,
        button,
        confirmation,
    }
}

fn build_signup(dom: &mut Dom, root: NodeId) -> SignupNodes {
    let section = dom.insert_child(
        root,
        NodeData::new("section").with_class("newsletter").with_style(section_style()),
    );
    let panel = dom.insert_child(
        section,
        NodeData::new("div")
            .with_class("panel")
            .with_style(BoxStyle::column().with_height(Scalar::px(480.0))),
    );
    heading(dom, panel, "h2", "Bleib auf dem Laufenden", 48.0);
    let form = dom.insert_child(panel, NodeData::new("form").with_style(BoxStyle::wrapping_row()));
    let input = dom.insert_child(
        form,
        NodeData::new("input")
            .with_attr("type", "email")
            .with_attr("placeholder", "Deine E-Mail-Adresse")
            .with_value(""),
    );
    let button = dom.insert_child(
        form,
        NodeData::new("button")
            .with_attr("type", "submit")
            .with_text("Anmelden")
            .with_action(UiAction::SubmitSignup)
            .focusable(true),
    );
    let thanks = dom.insert_child(
        panel,
        NodeData::new("div").with_class("thanks").with_style(BoxStyle {
            hidden: true,
            ..BoxStyle::column()
        }),
    );
    dom.insert_child(thanks, NodeData::new("h3").with_text("Vielen Dank!"));
    dom.insert_child(
        thanks,
        NodeData::new("p").with_text("Du erhältst bald eine Bestätigungs-E-Mail."),
    );
    let privacy = dom.insert_child(
        panel,
        NodeData::new("p")
            .with_class("privacy")
            .with_text("Mit der Anmeldung stimmst du unserer Datenschutzerklärung zu."),
    );
    SignupNodes {
        section,
        panel,
        form,
        input,
        button,
        thanks,
        privacy,
    }
}
