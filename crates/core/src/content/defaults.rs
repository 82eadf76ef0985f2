//! Compiled-in page content shown until an admin saves a page.

use super::schema::{
    AboutBody, AboutContent, ContactContent, ContactInfo, FaqContent, HomeAbout, HomeHero, HomeStats,
    PageHero,
};

impl Default for HomeHero {
    fn default() -> Self {
        Self {
            title: "أفضل منتجات الألوميتال في مصر".to_string(),
            subtitle: "مطابخ وأبواب وشبابيك ألوميتال عصرية بجودة عالية".to_string(),
            background_image: "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=1200"
                .to_string(),
            button_text: "تصفح المنتجات".to_string(),
        }
    }
}

impl Default for HomeAbout {
    fn default() -> Self {
        Self {
            title: "لماذا تختار kynship؟".to_string(),
            description: "نتميز بخبرة تزيد عن 15 عامًا في مجال الألوميتال".to_string(),
            features: vec![
                "جودة عالية مضمونة".to_string(),
                "أسعار مناسبة ومنافسة".to_string(),
                "ضمان شامل على جميع المنتجات".to_string(),
            ],
        }
    }
}

impl Default for HomeStats {
    fn default() -> Self {
        Self {
            experience: "15".to_string(),
            projects: "5000".to_string(),
            clients: "3500".to_string(),
            employees: "45".to_string(),
        }
    }
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            hero: hero("من نحن", "شركة رائدة في مجال تصنيع وتركيب منتجات الألوميتال"),
            content: AboutBody {
                text: "نحن شركة kynship متخصصة في تصنيع وتركيب مطابخ وأبواب وشبابيك الألوميتال بأعلى معايير الجودة..."
                    .to_string(),
            },
        }
    }
}

impl Default for ContactContent {
    fn default() -> Self {
        Self {
            hero: hero("اتصل بنا", "نحن هنا للإجابة على جميع استفساراتك"),
            info: ContactInfo {
                phone: "+20 100 123 4567".to_string(),
                email: "info@kynship.com".to_string(),
                address: "القاهرة، مصر".to_string(),
            },
        }
    }
}

impl Default for FaqContent {
    fn default() -> Self {
        Self {
            hero: hero("الأسئلة الشائعة", "إجابات على أكثر الأسئلة شيوعاً"),
        }
    }
}

fn hero(title: &str, subtitle: &str) -> PageHero {
    PageHero {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
    }
}
