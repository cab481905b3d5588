//! Transfer objects used at the web boundary and their conversions

use serde::{Deserialize, Serialize};

use crate::models::{Image, Product};

/// Product as shown to shoppers and stored in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Product page payload: the product and its picture, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: ProductDto,
    pub category_id: i32,
    pub image: Option<ImageDto>,
}

impl ProductDetails {
    pub fn new(product: Product, image: Option<Image>) -> Self {
        let category_id = product.category_id;
        Self {
            product: product.into(),
            category_id,
            image: image.map(ImageDto::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDto {
    pub product_id: i32,
    pub link: String,
}

impl From<Image> for ImageDto {
    fn from(image: Image) -> Self {
        Self {
            product_id: image.product_id,
            link: image.link,
        }
    }
}

/// Registration form as posted by the sign-up page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    /// `yyyy-MM-dd`, empty when not given
    #[serde(default, rename = "birthDate", alias = "birth_date")]
    pub birth_date: Option<String>,
}

/// Login form. Field names match the login page.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default, rename = "remember-me")]
    pub remember_me: Option<String>,
}

impl LoginForm {
    /// Checkbox values "on", "true", "yes" and "1" enable remember-me
    pub fn remember_me(&self) -> bool {
        matches!(
            self.remember_me.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("on" | "true" | "yes" | "1")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea() -> Product {
        Product {
            id: 4,
            name: "Tea".to_string(),
            description: Some("Loose leaf".to_string()),
            price: 3.5,
            category_id: 2,
        }
    }

    #[test]
    fn product_record_becomes_transfer_object() {
        let dto = ProductDto::from(tea());
        assert_eq!(dto.product_id, 4);
        assert_eq!(dto.name, "Tea");
        assert_eq!(dto.description.as_deref(), Some("Loose leaf"));
        assert_eq!(dto.price, 3.5);
    }

    #[test]
    fn product_details_flatten_the_product() {
        let details = ProductDetails::new(
            tea(),
            Some(Image {
                product_id: 4,
                link: "/img/tea.png".to_string(),
            }),
        );
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["product_id"], 4);
        assert_eq!(json["category_id"], 2);
        assert_eq!(json["image"]["link"], "/img/tea.png");
    }

    #[test]
    fn remember_me_checkbox_values() {
        let mut form = LoginForm {
            username: "bob".to_string(),
            password: "pw".to_string(),
            remember_me: None,
        };
        assert!(!form.remember_me());

        form.remember_me = Some("on".to_string());
        assert!(form.remember_me());

        form.remember_me = Some("TRUE".to_string());
        assert!(form.remember_me());

        form.remember_me = Some("off".to_string());
        assert!(!form.remember_me());
    }
}
