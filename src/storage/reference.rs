//! The built-in reference catalog.

use crate::domain::{Category, ItemRecord};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// The five-laptop catalog used when no catalog file is configured.
///
/// Performance scores are 6, 8, 9, 10 and 7, in catalog order.
#[must_use]
pub fn reference_catalog() -> Vec<ItemRecord> {
    vec![
        ItemRecord {
            id: "dell-latitude-3420".to_string(),
            manufacturer: "Dell".to_string(),
            model: "Latitude 3420".to_string(),
            processor: "Intel Core i5-1135G7".to_string(),
            memory: "8GB DDR4".to_string(),
            storage: "256GB SSD".to_string(),
            price: 899,
            category: Category::Basic,
            description: "Reliable business laptop for everyday office tasks and productivity \
                          work."
                .to_string(),
            specifications: "14-inch FHD display, Intel Iris Xe Graphics, Windows 11 Pro, 6-cell \
                             battery"
                .to_string(),
            available: true,
            use_cases: strings(&[
                "office work",
                "email",
                "web browsing",
                "document editing",
                "basic business applications",
            ]),
            selling_points: strings(&[
                "Affordable",
                "Reliable build quality",
                "Good battery life",
                "Corporate security features",
            ]),
            target_audience: "Office workers, administrative staff, budget-conscious users"
                .to_string(),
            performance_score: 6,
        },
        ItemRecord {
            id: "hp-elitebook-840".to_string(),
            manufacturer: "HP".to_string(),
            model: "EliteBook 840 G8".to_string(),
            processor: "Intel Core i7-1165G7".to_string(),
            memory: "16GB DDR4".to_string(),
            storage: "512GB SSD".to_string(),
            price: 1299,
            category: Category::Standard,
            description: "Professional business laptop with enhanced performance for demanding \
                          applications."
                .to_string(),
            specifications: "14-inch FHD display, Intel Iris Xe Graphics, Windows 11 Pro, Bang & \
                             Olufsen audio"
                .to_string(),
            available: true,
            use_cases: strings(&[
                "business analysis",
                "data processing",
                "presentations",
                "moderate development",
                "multitasking",
            ]),
            selling_points: strings(&[
                "Excellent build quality",
                "Great keyboard",
                "Strong performance",
                "Professional design",
            ]),
            target_audience: "Business analysts, project managers, consultants, mid-level \
                              professionals"
                .to_string(),
            performance_score: 8,
        },
        ItemRecord {
            id: "lenovo-thinkpad-x1".to_string(),
            manufacturer: "Lenovo".to_string(),
            model: "ThinkPad X1 Carbon".to_string(),
            processor: "Intel Core i7-1260P".to_string(),
            memory: "16GB LPDDR5".to_string(),
            storage: "1TB SSD".to_string(),
            price: 1899,
            category: Category::Premium,
            description: "Ultra-premium business laptop with exceptional build quality and \
                          performance."
                .to_string(),
            specifications: "14-inch 4K HDR display, Intel Iris Xe Graphics, Windows 11 Pro, \
                             Carbon fiber construction"
                .to_string(),
            available: true,
            use_cases: strings(&[
                "executive work",
                "high-performance computing",
                "content creation",
                "advanced business applications",
            ]),
            selling_points: strings(&[
                "Premium build quality",
                "Excellent keyboard",
                "Ultra-portable",
                "Long battery life",
            ]),
            target_audience: "Executives, senior professionals, frequent travelers, power users"
                .to_string(),
            performance_score: 9,
        },
        ItemRecord {
            id: "apple-macbook-pro-14".to_string(),
            manufacturer: "Apple".to_string(),
            model: "MacBook Pro 14\"".to_string(),
            processor: "Apple M2 Pro".to_string(),
            memory: "16GB Unified Memory".to_string(),
            storage: "512GB SSD".to_string(),
            price: 2499,
            category: Category::Developer,
            description: "High-performance laptop designed for developers, content creators, and \
                          power users."
                .to_string(),
            specifications: "14-inch Liquid Retina XDR display, Apple M2 Pro chip, macOS Ventura, \
                             ProRes support"
                .to_string(),
            available: true,
            use_cases: strings(&[
                "software development",
                "mobile app development",
                "video editing",
                "machine learning",
                "creative work",
            ]),
            selling_points: strings(&[
                "Exceptional performance",
                "Amazing display",
                "Long battery life",
                "Silent operation",
            ]),
            target_audience: "Software developers, content creators, designers, iOS developers"
                .to_string(),
            performance_score: 10,
        },
        ItemRecord {
            id: "microsoft-surface-laptop-5".to_string(),
            manufacturer: "Microsoft".to_string(),
            model: "Surface Laptop 5".to_string(),
            processor: "Intel Core i7-1255U".to_string(),
            memory: "16GB LPDDR5x".to_string(),
            storage: "512GB SSD".to_string(),
            price: 1699,
            category: Category::Premium,
            description: "Sleek and portable laptop perfect for modern business professionals."
                .to_string(),
            specifications: "13.5-inch PixelSense touchscreen, Intel Iris Xe Graphics, Windows \
                             11, Alcantara fabric"
                .to_string(),
            available: true,
            use_cases: strings(&[
                "business presentations",
                "touch-based applications",
                "Microsoft ecosystem",
                "design work",
            ]),
            selling_points: strings(&[
                "Beautiful design",
                "Touchscreen",
                "Great for Microsoft ecosystem",
                "Lightweight",
            ]),
            target_audience: "Business professionals, Microsoft ecosystem users, designers, \
                              presenters"
                .to_string(),
            performance_score: 7,
        },
    ]
}
