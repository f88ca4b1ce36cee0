//! Role screens
//!
//! Each role gets one screen; [`RoleScreen`] picks it from the session role
//! and dispatches statically.

use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::AppResult;
use shared::models::{CartLine, MenuOption, Product, ProductCategory, Role, Tab, TabStatus, TabTarget};

use super::{EditingTab, Session};
use crate::catalog::Catalog;
use crate::tabs::TabService;

const MENU_SECTIONS: [ProductCategory; 4] = [
    ProductCategory::Sandwich,
    ProductCategory::Cream,
    ProductCategory::Drink,
    ProductCategory::Other,
];

/// What a screen needs besides the session
pub struct ScreenContext<'a> {
    pub catalog: &'a Catalog,
    pub tabs: &'a TabService,
}

#[enum_dispatch]
pub trait Screen {
    fn render(&self, session: &Session, ctx: &ScreenContext<'_>) -> AppResult<ScreenView>;
}

/// Screen per role
#[enum_dispatch(Screen)]
pub enum RoleScreen {
    Order(OrderScreen),
    Cashier(CashierScreen),
    Kitchen(KitchenScreen),
    Admin(AdminScreen),
}

impl From<Role> for RoleScreen {
    fn from(role: Role) -> Self {
        match role {
            Role::Waiter => RoleScreen::Order(OrderScreen),
            Role::Cashier => RoleScreen::Cashier(CashierScreen),
            Role::Kitchen => RoleScreen::Kitchen(KitchenScreen),
            Role::Admin => RoleScreen::Admin(AdminScreen),
        }
    }
}

/// Rendered screen
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    Order {
        title: &'static str,
        order: OrderView,
    },
    Cashier {
        title: &'static str,
        /// `novo` tabs, oldest first
        pending: Vec<Tab>,
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<&'static str>,
        order: OrderView,
    },
    Kitchen {
        title: &'static str,
        /// `pago` tabs, oldest first
        queue: Vec<Tab>,
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<&'static str>,
    },
    Admin {
        title: &'static str,
        message: &'static str,
    },
}

/// Order placement panel
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub target: TabTarget,
    pub editing: Option<EditingTab>,
    pub cart: Vec<CartLine>,
    pub cart_total: Decimal,
    pub menu: Vec<MenuSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuSection {
    pub category: ProductCategory,
    pub products: Vec<MenuEntry>,
}

/// A product with the options it accepts
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub product: Product,
    pub options: Vec<MenuOption>,
}

fn order_view(session: &Session, catalog: &Catalog) -> OrderView {
    let menu = MENU_SECTIONS
        .iter()
        .map(|&category| MenuSection {
            category,
            products: catalog
                .products_in(category)
                .map(|product| MenuEntry {
                    product: product.clone(),
                    options: catalog.options_for(product).cloned().collect(),
                })
                .collect(),
        })
        .filter(|section| !section.products.is_empty())
        .collect();

    OrderView {
        target: session.target.clone(),
        editing: session.editing.clone(),
        cart: session.cart.clone(),
        cart_total: session.cart_total(),
        menu,
    }
}

pub struct OrderScreen;

impl Screen for OrderScreen {
    fn render(&self, session: &Session, ctx: &ScreenContext<'_>) -> AppResult<ScreenView> {
        Ok(ScreenView::Order {
            title: "Novo Pedido",
            order: order_view(session, ctx.catalog),
        })
    }
}

pub struct CashierScreen;

impl Screen for CashierScreen {
    fn render(&self, session: &Session, ctx: &ScreenContext<'_>) -> AppResult<ScreenView> {
        let pending = ctx.tabs.queue(TabStatus::New)?;
        let notice = pending
            .is_empty()
            .then_some("Nenhuma conta pendente de pagamento.");
        Ok(ScreenView::Cashier {
            title: "Painel do Caixa",
            pending,
            notice,
            order: order_view(session, ctx.catalog),
        })
    }
}

pub struct KitchenScreen;

impl Screen for KitchenScreen {
    fn render(&self, _session: &Session, ctx: &ScreenContext<'_>) -> AppResult<ScreenView> {
        let queue = ctx.tabs.queue(TabStatus::Paid)?;
        let notice = queue.is_empty().then_some("Nenhum pedido na fila.");
        Ok(ScreenView::Kitchen {
            title: "Cozinha - Fila de Preparo",
            queue,
            notice,
        })
    }
}

pub struct AdminScreen;

impl Screen for AdminScreen {
    fn render(&self, _session: &Session, _ctx: &ScreenContext<'_>) -> AppResult<ScreenView> {
        Ok(ScreenView::Admin {
            title: "Painel do Administrador",
            message: "Gerenciamento de produtos e usuários ainda não disponível.",
        })
    }
}
